//! Smoothing of one column
use std::str::FromStr;

use strum::{EnumIter, IntoEnumIterator};

use crate::{
    config::{choices, parse_choice, Config, ConfigError},
    prelude::Epoch,
    series::{ColumnKey, Series},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Averaging modes
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Averaging {
    /// Raw data
    #[default]
    #[strum(serialize = "none")]
    None,
    /// Running mean over the window, one output per minute.
    /// The mean is valid for the beginning of the window.
    #[strum(serialize = "running")]
    Running,
    /// Running mean, decimated to one output per window
    #[strum(serialize = "static")]
    Static,
    /// Raw data, decimated to one output per window
    #[strum(serialize = "resampled")]
    Resampled,
}

impl FromStr for Averaging {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s).ok_or_else(|| ConfigError::UnknownAveraging {
            name: s.to_string(),
            valid: choices(Self::iter()),
        })
    }
}

/// [Averager] applies one [Averaging] mode over a window of samples
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Averager {
    pub averaging: Averaging,
    /// Window size, in samples (minutes)
    pub window: usize,
}

impl Averager {
    pub fn new(averaging: Averaging, window: usize) -> Self {
        Self { averaging, window }
    }

    /// Builds the [Averager] described by [Config]
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.effective_averaging(), cfg.window)
    }

    /// Smoothes `input`.
    /// ```
    /// use paws::prelude::*;
    /// use std::str::FromStr;
    ///
    /// let t0 = Epoch::from_str("2020-01-15T00:00:00 UTC").unwrap();
    /// let dt = Duration::from_seconds(60.0);
    /// let input = vec![(t0, Some(1.0)), (t0 + dt, Some(3.0)), (t0 + dt * 2_i64, Some(5.0))];
    ///
    /// let running = Averager::new(Averaging::Running, 2).eval(input.clone());
    /// assert_eq!(running[0], (t0, Some(2.0)));
    /// assert_eq!(running[1], (t0 + dt, Some(4.0)));
    /// assert_eq!(running[2], (t0 + dt * 2_i64, None));
    ///
    /// let resampled = Averager::new(Averaging::Resampled, 2).eval(input);
    /// assert_eq!(resampled, vec![(t0, Some(1.0)), (t0 + dt * 2_i64, Some(5.0))]);
    /// ```
    pub fn eval(&self, input: Vec<(Epoch, Option<f64>)>) -> Vec<(Epoch, Option<f64>)> {
        let window = self.window.max(1);
        match self.averaging {
            Averaging::None => input,
            Averaging::Running => running_mean(input, window),
            Averaging::Static => running_mean(input, window)
                .into_iter()
                .step_by(window)
                .collect(),
            Averaging::Resampled => input.into_iter().step_by(window).collect(),
        }
    }
}

/*
 * Forward looking window: mean of [i, i+window[ is valid at i.
 * Any missing sample, or a window running past the end, is missing.
 */
fn running_mean(input: Vec<(Epoch, Option<f64>)>, window: usize) -> Vec<(Epoch, Option<f64>)> {
    let values = input.iter().map(|(_, value)| *value).collect::<Vec<_>>();
    input
        .iter()
        .enumerate()
        .map(|(i, (epoch, _))| {
            if i + window > values.len() {
                return (*epoch, None);
            }
            let sum = values[i..i + window].iter().copied().sum::<Option<f64>>();
            (*epoch, sum.map(|sum| sum / window as f64))
        })
        .collect()
}

impl Series {
    /// Smoothes given column with [Averager]
    pub fn smoothed(
        &self,
        key: &ColumnKey,
        averager: &Averager,
    ) -> Option<Vec<(Epoch, Option<f64>)>> {
        let column = self.column(key)?;
        let input = self
            .epochs()
            .iter()
            .copied()
            .zip(column.iter().copied())
            .collect();
        Some(averager.eval(input))
    }
}
