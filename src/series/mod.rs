//! Time series of sensor measurements, on a one minute grid
use std::ops::RangeInclusive;

use itertools::Itertools;

use crate::{
    epoch::{minute, minutes_between},
    observable::Observable,
    prelude::{Duration, Epoch, Error, TimeSeries},
    sensor::Sensor,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod normalize;
pub mod uptime;

pub use normalize::{normalize, Diagnostics};
pub use uptime::Uptime;

/// [ColumnKey] identifies one column of a [Series]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnKey {
    /// Sensor that produced this column
    pub sensor: Sensor,
    /// Measurement
    pub observable: Observable,
}

impl ColumnKey {
    pub fn new(sensor: Sensor, observable: Observable) -> Self {
        Self { sensor, observable }
    }
}

impl std::fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}_{}", self.sensor, self.observable)
    }
}

/// One timestamped set of measurements
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorRow {
    /// Timestamp
    pub epoch: Epoch,
    /// Values, in column order. None is the missing-report sentinel.
    pub values: Vec<Option<f64>>,
}

/// [Series] is a column major table keyed by [Epoch].
/// Once normalized, epochs are strictly increasing by one minute
/// and the first column is the primary column: its values decide
/// whether the station reported or not, at each minute.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Series {
    columns: Vec<ColumnKey>,
    epochs: Vec<Epoch>,
    data: Vec<Vec<Option<f64>>>,
}

impl Series {
    pub(crate) fn from_parts(
        columns: Vec<ColumnKey>,
        epochs: Vec<Epoch>,
        data: Vec<Vec<Option<f64>>>,
    ) -> Self {
        Self {
            columns,
            epochs,
            data,
        }
    }

    /// Column keys, in order
    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    /// Timestamps
    pub fn epochs(&self) -> &[Epoch] {
        &self.epochs
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    /// Returns true if this [Series] has no rows
    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    /// Values of the given column
    pub fn column(&self, key: &ColumnKey) -> Option<&[Option<f64>]> {
        let index = self.columns.iter().position(|k| k == key)?;
        Some(&self.data[index])
    }

    /// Values of the first column measuring `observable`
    pub fn observable(&self, observable: Observable) -> Option<&[Option<f64>]> {
        let index = self
            .columns
            .iter()
            .position(|k| k.observable == observable)?;
        Some(&self.data[index])
    }

    /// Values of the primary column
    pub fn primary(&self) -> Option<&[Option<f64>]> {
        self.data.first().map(|column| column.as_slice())
    }

    /// Value of given column at given [Epoch]
    pub fn get(&self, key: &ColumnKey, epoch: Epoch) -> Option<f64> {
        let position = self.position(epoch)?;
        self.column(key)?[position]
    }

    /// Iterates rows, in chronological order
    pub fn rows(&self) -> impl Iterator<Item = SensorRow> + '_ {
        self.epochs
            .iter()
            .enumerate()
            .map(|(i, epoch)| SensorRow {
                epoch: *epoch,
                values: self.data.iter().map(|column| column[i]).collect(),
            })
    }

    /// Row index of given [Epoch], rounded to the nearest minute.
    /// This relies on the one minute grid and is only meaningful
    /// on a normalized [Series].
    pub fn position(&self, epoch: Epoch) -> Option<usize> {
        let first = self.first_epoch()?;
        let offset = minutes_between(first, epoch);
        if offset < 0 || offset as usize >= self.len() {
            None
        } else {
            Some(offset as usize)
        }
    }

    /// Returns the rows within given inclusive index range,
    /// clamped to this [Series].
    pub fn slice(&self, range: RangeInclusive<usize>) -> Self {
        let (start, end) = (*range.start(), *range.end());
        if self.is_empty() || start > end || start >= self.len() {
            return Self::from_parts(
                self.columns.clone(),
                Vec::new(),
                vec![Vec::new(); self.columns.len()],
            );
        }
        let end = end.min(self.len() - 1);
        Self::from_parts(
            self.columns.clone(),
            self.epochs[start..=end].to_vec(),
            self.data
                .iter()
                .map(|column| column[start..=end].to_vec())
                .collect(),
        )
    }

    /// First [Epoch]
    pub fn first_epoch(&self) -> Option<Epoch> {
        self.epochs.first().copied()
    }

    /// Last [Epoch]
    pub fn last_epoch(&self) -> Option<Epoch> {
        self.epochs.last().copied()
    }

    /// Time span, from first to last [Epoch]
    pub fn duration(&self) -> Option<Duration> {
        Some(self.last_epoch()? - self.first_epoch()?)
    }

    /// Returns the one minute [TimeSeries] this [Series] spans
    pub fn timeseries(&self) -> Option<TimeSeries> {
        Some(TimeSeries::inclusive(
            self.first_epoch()?,
            self.last_epoch()?,
            minute(),
        ))
    }

    /// Returns true if consecutive rows are exactly one minute apart
    pub fn is_steady(&self) -> bool {
        self.epochs
            .iter()
            .tuple_windows()
            .all(|(prev, next)| minutes_between(*prev, *next) == 1)
    }

    /// Timestamps for which the primary column has no value
    pub fn missing_epochs(&self) -> Vec<Epoch> {
        match self.primary() {
            Some(primary) => self
                .epochs
                .iter()
                .zip(primary.iter())
                .filter_map(|(epoch, value)| if value.is_none() { Some(*epoch) } else { None })
                .collect(),
            None => Vec::new(),
        }
    }

    /// Appends a column. Fails on length mismatch.
    pub(crate) fn push_column(
        &mut self,
        key: ColumnKey,
        values: Vec<Option<f64>>,
    ) -> Result<(), Error> {
        if values.len() != self.len() {
            return Err(Error::RowWidth {
                expected: self.len(),
                found: values.len(),
            });
        }
        self.columns.push(key);
        self.data.push(values);
        Ok(())
    }

    /// Appends a column computed from an existing column.
    /// Missing values stay missing. Does nothing if `source` does not exist.
    pub(crate) fn derive_column<F: Fn(f64) -> Option<f64>>(
        &mut self,
        source: &ColumnKey,
        target: ColumnKey,
        f: F,
    ) -> Result<(), Error> {
        let values = match self.column(source) {
            Some(values) => values.iter().map(|value| value.and_then(&f)).collect(),
            None => return Ok(()),
        };
        self.push_column(target, values)
    }

    /// Keeps only the columns that match the predicate
    pub fn retain_columns<F: Fn(&ColumnKey) -> bool>(&mut self, f: F) {
        let keep = self.columns.iter().map(&f).collect::<Vec<_>>();
        let mut keep_iter = keep.iter();
        self.columns.retain(|_| *keep_iter.next().unwrap_or(&false));
        let mut keep_iter = keep.iter();
        self.data.retain(|_| *keep_iter.next().unwrap_or(&false));
    }
}
