//! Uptime reporting
use std::ops::RangeInclusive;

use crate::{
    epoch::minute,
    prelude::{Duration, Epoch},
    series::Series,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reporting statistics over a number of one minute slots
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Uptime {
    /// Slots without primary value
    pub missing: usize,
    /// Total number of slots
    pub total: usize,
}

impl Uptime {
    pub fn new(missing: usize, total: usize) -> Self {
        Self { missing, total }
    }

    /// Number of slots with a primary value
    pub fn reporting(&self) -> usize {
        self.total.saturating_sub(self.missing)
    }

    /// Uptime percentage, rounded to one decimal.
    /// ```
    /// use paws::prelude::Uptime;
    /// assert_eq!(Uptime::new(10, 100).percentage(), 90.0);
    /// assert_eq!(Uptime::new(1, 3).percentage(), 66.7);
    /// assert_eq!(Uptime::new(0, 0).percentage(), 0.0);
    /// ```
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let ratio = 1.0 - self.missing as f64 / self.total as f64;
        (ratio * 1000.0).round() / 10.0
    }

    /// Total time covered
    pub fn total_duration(&self) -> Duration {
        minute() * self.total as i64
    }

    /// Time during which the station reported
    pub fn uptime_duration(&self) -> Duration {
        minute() * self.reporting() as i64
    }
}

impl std::fmt::Display for Uptime {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} out of {} ({}%)",
            self.uptime_duration(),
            self.total_duration(),
            self.percentage()
        )
    }
}

impl Series {
    /// [Uptime] over the complete [Series]
    pub fn uptime(&self) -> Uptime {
        self.uptime_within(0..=self.len().saturating_sub(1))
    }

    /// [Uptime] within given inclusive row range, clamped to this [Series]
    pub fn uptime_within(&self, range: RangeInclusive<usize>) -> Uptime {
        let (start, end) = (*range.start(), *range.end());
        if self.is_empty() || start > end || start >= self.len() {
            return Uptime::default();
        }
        let end = end.min(self.len() - 1);
        let total = end - start + 1;
        let missing = match self.primary() {
            Some(primary) => primary[start..=end]
                .iter()
                .filter(|value| value.is_none())
                .count(),
            None => 0,
        };
        Uptime::new(missing, total)
    }

    /// [Uptime] between two [Epoch]s, both included.
    /// Returns None if either is outside this [Series].
    pub fn uptime_between(&self, start: Epoch, end: Epoch) -> Option<Uptime> {
        let start = self.position(start)?;
        let end = self.position(end)?;
        Some(self.uptime_within(start..=end))
    }
}
