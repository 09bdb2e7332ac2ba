//! Merge trait, to join series measured by different sensors
use thiserror::Error;

use crate::{
    epoch::{minute, minutes_between},
    prelude::Epoch,
    series::Series,
};

/// [Merge] specific Errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Both series define the same column
    #[error("column \"{0}\" is defined in both series")]
    DuplicateColumn(String),
    /// Series must be normalized prior merging
    #[error("series are not on a one minute grid")]
    NotSteady,
}

/// [Merge] joins two datasets in time.
pub trait Merge {
    /// Merge "rhs" dataset into self, to form an extended dataset.
    fn merge(&self, rhs: &Self) -> Result<Self, Error>
    where
        Self: Sized;
    /// [Self::merge] mutable implementation.
    fn merge_mut(&mut self, rhs: &Self) -> Result<(), Error>;
}

impl Merge for Series {
    fn merge(&self, rhs: &Self) -> Result<Self, Error> {
        let mut s = self.clone();
        s.merge_mut(rhs)?;
        Ok(s)
    }

    /// Outer join on the one minute grid: the result spans both series,
    /// and cells that neither series defines are missing.
    fn merge_mut(&mut self, rhs: &Self) -> Result<(), Error> {
        if let Some(key) = rhs.columns().iter().find(|key| self.columns().contains(key)) {
            return Err(Error::DuplicateColumn(key.to_string()));
        }
        if !self.is_steady() || !rhs.is_steady() {
            return Err(Error::NotSteady);
        }

        let bounds = [
            self.first_epoch(),
            self.last_epoch(),
            rhs.first_epoch(),
            rhs.last_epoch(),
        ];
        let first = bounds.iter().flatten().min().copied();
        let last = bounds.iter().flatten().max().copied();

        let epochs = match (first, last) {
            (Some(first), Some(last)) => {
                let span = minutes_between(first, last) + 1;
                (0..span)
                    .map(|n| first + minute() * n)
                    .collect::<Vec<Epoch>>()
            },
            _ => Vec::new(),
        };

        let mut columns = self.columns().to_vec();
        columns.extend_from_slice(rhs.columns());

        let mut data = Vec::with_capacity(columns.len());
        for series in [&*self, rhs] {
            let offset = match (first, series.first_epoch()) {
                (Some(first), Some(start)) => minutes_between(first, start) as usize,
                _ => 0,
            };
            for key in series.columns() {
                let mut values = vec![None; epochs.len()];
                if let Some(column) = series.column(key) {
                    for (i, value) in column.iter().enumerate() {
                        values[offset + i] = *value;
                    }
                }
                data.push(values);
            }
        }

        *self = Series::from_parts(columns, epochs, data);
        Ok(())
    }
}
