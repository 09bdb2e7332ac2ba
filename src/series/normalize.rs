//! Series normalization: sorting, duplicate removal and gap filling
use itertools::Itertools;

use crate::{
    epoch::{minute, minutes_between, round_half_up},
    prelude::{Epoch, Error},
    series::{ColumnKey, SensorRow, Series, Uptime},
};

#[cfg(feature = "log")]
use log::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Anomalies found while normalizing a [Series]
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostics {
    /// Timestamps found earlier than their predecessor,
    /// in original order (station clock rolled back)
    pub time_resets: Vec<Epoch>,
    /// Timestamps of dropped duplicate rows, one entry per dropped row
    pub duplicates: Vec<Epoch>,
    /// Number of gaps: consecutive rows more than one minute apart
    pub gaps: usize,
    /// Timestamps for which the primary column has no value
    pub missing: Vec<Epoch>,
    /// Uptime over the complete [Series]
    pub uptime: Uptime,
}

impl Diagnostics {
    /// Number of time resets
    pub fn time_reset_count(&self) -> usize {
        self.time_resets.len()
    }

    /// Number of dropped duplicates
    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }

    /// Number of missing reports
    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }
}

/// Normalizes unordered `rows` into a [Series] with one row per minute,
/// from the earliest to the latest timestamp.
///
/// - rows are sorted chronologically, with a stable sort
/// - for duplicate timestamps, the row that came first in `rows` wins
/// - minutes without any row are filled with missing values
///
/// Rows that are not minute aligned are first rounded to the nearest
/// minute with [round_half_up], like the record parser does.
/// ```
/// use paws::prelude::*;
/// use std::str::FromStr;
///
/// let t0 = Epoch::from_str("2020-01-15T00:00:00 UTC").unwrap();
/// let key = ColumnKey::new(Sensor::Anemometer, Observable::WindSpeed);
/// let rows = vec![
///     SensorRow { epoch: t0 + Duration::from_seconds(120.0), values: vec![Some(6.0)] },
///     SensorRow { epoch: t0, values: vec![Some(5.0)] },
/// ];
/// let (series, diagnostics) = normalize(vec![key], rows).unwrap();
/// assert_eq!(series.len(), 3);
/// assert_eq!(series.primary().unwrap(), &[Some(5.0), None, Some(6.0)]);
/// assert_eq!(diagnostics.gaps, 1);
/// assert_eq!(diagnostics.time_resets.len(), 1);
/// assert_eq!(diagnostics.uptime.percentage(), 66.7);
/// ```
pub fn normalize(
    columns: Vec<ColumnKey>,
    mut rows: Vec<SensorRow>,
) -> Result<(Series, Diagnostics), Error> {
    if rows.is_empty() {
        return Err(Error::EmptySeries);
    }
    if let Some(row) = rows.iter().find(|row| row.values.len() != columns.len()) {
        return Err(Error::RowWidth {
            expected: columns.len(),
            found: row.values.len(),
        });
    }

    for row in rows.iter_mut() {
        row.epoch = round_half_up(row.epoch);
    }

    let time_resets = rows
        .iter()
        .tuple_windows()
        .filter_map(|(prev, next)| {
            if next.epoch < prev.epoch {
                Some(next.epoch)
            } else {
                None
            }
        })
        .collect::<Vec<_>>();

    #[cfg(feature = "log")]
    if !time_resets.is_empty() {
        warn!("{} time reset(s) detected", time_resets.len());
        for epoch in time_resets.iter() {
            debug!("time reset: {}", epoch);
        }
    }

    // rows is not empty
    let first = rows
        .iter()
        .map(|row| row.epoch)
        .min()
        .ok_or(Error::EmptySeries)?;

    // integer minute offsets keep grid placement exact
    let mut indexed = rows
        .into_iter()
        .map(|row| (minutes_between(first, row.epoch), row))
        .collect::<Vec<_>>();

    // stable: ties keep their original order
    indexed.sort_by_key(|(offset, _)| *offset);

    let mut duplicates = Vec::<Epoch>::new();
    let mut unique = Vec::<(i64, SensorRow)>::with_capacity(indexed.len());
    for (offset, row) in indexed {
        match unique.last() {
            Some((last, _)) if *last == offset => duplicates.push(row.epoch),
            _ => unique.push((offset, row)),
        }
    }

    #[cfg(feature = "log")]
    if !duplicates.is_empty() {
        warn!("{} duplicate timestamp(s) dropped", duplicates.len());
        for epoch in duplicates.iter() {
            debug!("duplicate: {}", epoch);
        }
    }

    let gaps = unique
        .iter()
        .tuple_windows()
        .filter(|((prev, _), (next, _))| next - prev > 1)
        .count();

    // unique is not empty
    let span = unique.last().map(|(offset, _)| *offset).unwrap_or(0) as usize + 1;

    let epochs = (0..span)
        .map(|n| first + minute() * n as i64)
        .collect::<Vec<_>>();

    let mut data = vec![vec![None; span]; columns.len()];
    for (offset, row) in unique {
        for (column, value) in data.iter_mut().zip(row.values.into_iter()) {
            column[offset as usize] = value;
        }
    }

    let series = Series::from_parts(columns, epochs, data);
    let missing = series.missing_epochs();
    let uptime = Uptime::new(missing.len(), series.len());

    #[cfg(feature = "log")]
    {
        if gaps > 0 {
            info!(
                "{} gap(s) filled: {} missing report(s) over {} minute(s)",
                gaps,
                missing.len(),
                span
            );
        }
        info!("uptime: {}", uptime);
    }

    let diagnostics = Diagnostics {
        time_resets,
        duplicates,
        gaps,
        missing,
        uptime,
    };

    Ok((series, diagnostics))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{observable::Observable, prelude::Duration, sensor::Sensor};
    use std::str::FromStr;

    fn t(offset: i64) -> Epoch {
        Epoch::from_str("2020-01-15T00:00:00 UTC").unwrap() + minute() * offset
    }

    fn row(offset: i64, value: f64) -> SensorRow {
        SensorRow {
            epoch: t(offset),
            values: vec![Some(value)],
        }
    }

    fn key() -> Vec<ColumnKey> {
        vec![ColumnKey::new(Sensor::Anemometer, Observable::WindSpeed)]
    }

    #[test]
    fn gap_filling() {
        let (series, diag) = normalize(key(), vec![row(0, 5.0), row(2, 6.0)]).unwrap();
        assert_eq!(series.epochs(), &[t(0), t(1), t(2)]);
        assert_eq!(series.primary().unwrap(), &[Some(5.0), None, Some(6.0)]);
        assert_eq!(diag.gaps, 1);
        assert_eq!(diag.missing, vec![t(1)]);
        assert_eq!(diag.uptime, Uptime::new(1, 3));
        assert!(diag.duplicates.is_empty());
        assert!(diag.time_resets.is_empty());
    }

    #[test]
    fn first_occurrence_wins() {
        let rows = vec![row(3, 1.0), row(1, 7.0), row(0, 2.0), row(1, 7.5), row(1, 8.0)];
        let (series, diag) = normalize(key(), rows).unwrap();
        assert_eq!(
            series.primary().unwrap(),
            &[Some(2.0), Some(7.0), None, Some(1.0)]
        );
        assert_eq!(diag.duplicates, vec![t(1), t(1)]);
        assert_eq!(diag.time_resets, vec![t(1), t(0)]);
        assert_eq!(diag.gaps, 1);
    }

    #[test]
    fn unaligned_rows() {
        let second = Duration::from_seconds(1.0);
        let rows = vec![
            SensorRow {
                epoch: t(0) + second * 40_i64,
                values: vec![Some(1.0)],
            },
            row(1, 2.0),
            SensorRow {
                epoch: t(2) + second * 29_i64,
                values: vec![Some(3.0)],
            },
            SensorRow {
                epoch: t(3) + second * 30_i64,
                values: vec![Some(4.0)],
            },
        ];
        let (series, diag) = normalize(key(), rows).unwrap();
        assert_eq!(series.epochs(), &[t(1), t(2), t(3), t(4)]);
        assert_eq!(
            series.primary().unwrap(),
            &[Some(1.0), Some(3.0), None, Some(4.0)]
        );
        assert_eq!(diag.duplicates, vec![t(1)]);
        assert_eq!(diag.gaps, 1);
        assert!(series.is_steady());
    }

    #[test]
    fn single_row() {
        let (series, diag) = normalize(key(), vec![row(0, 1.0)]).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(diag.gaps, 0);
        assert_eq!(diag.uptime.percentage(), 100.0);
    }

    #[test]
    fn fully_missing_is_not_an_error() {
        let rows = vec![
            SensorRow {
                epoch: t(0),
                values: vec![None],
            },
            SensorRow {
                epoch: t(1),
                values: vec![None],
            },
        ];
        let (series, diag) = normalize(key(), rows).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(diag.uptime.percentage(), 0.0);
    }

    #[test]
    fn invalid_inputs() {
        assert!(matches!(normalize(key(), vec![]), Err(Error::EmptySeries)));
        let rows = vec![SensorRow {
            epoch: t(0),
            values: vec![Some(1.0), Some(2.0)],
        }];
        assert!(matches!(
            normalize(key(), rows),
            Err(Error::RowWidth {
                expected: 1,
                found: 2
            })
        ));
    }
}
