//! Time frame selection within a normalized [Series]
use std::ops::RangeInclusive;
use std::str::FromStr;

use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

use crate::{
    config::{choices, parse_choice, ConfigError},
    epoch::{format_bound, parse_bound},
    prelude::{Duration, Epoch},
    series::{Series, Uptime},
};

#[cfg(feature = "log")]
use log::{info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Time frame boundary
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Time frame selection errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("incorrect format for {0} \"{1}\", should be YYYY-MM-DD HH:mm")]
    BoundFormat(Bound, String),
    #[error("{bound} {epoch} is outside of the series: first {first}, last {last}")]
    OutOfSpan {
        bound: Bound,
        epoch: String,
        first: String,
        last: String,
    },
    #[error("start {start} is greater than or equal to end {end}")]
    StartNotBeforeEnd { start: String, end: String },
    #[error("time frame spans {span}, {period} period requires at least {minimum}")]
    TooShort {
        period: Period,
        span: Duration,
        minimum: Duration,
    },
    #[error("cannot select within an empty series")]
    EmptySeries,
}

/// Reporting periods. Each requires a minimal time frame.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Period {
    /// Any time frame
    #[default]
    #[strum(serialize = "default")]
    Default,
    /// At least one day
    #[strum(serialize = "daily")]
    Daily,
    /// At least 7 days
    #[strum(serialize = "weekly")]
    Weekly,
    /// At least 28 days, including a first of the month
    #[strum(serialize = "monthly")]
    Monthly,
}

impl FromStr for Period {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s).ok_or_else(|| ConfigError::UnknownPeriod {
            name: s.to_string(),
            valid: choices(Self::iter()),
        })
    }
}

impl Period {
    /// Minimal time frame duration
    pub fn minimum_span(&self) -> Option<Duration> {
        let day = Duration::from_days(1.0);
        match self {
            Self::Default => None,
            Self::Daily => Some(day),
            Self::Weekly => Some(day * 7_i64),
            Self::Monthly => Some(day * 28_i64),
        }
    }
}

/// [TimeFrame] is an optional start and an optional end,
/// both included. Missing bounds extend to the series boundaries.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeFrame {
    pub start: Option<Epoch>,
    pub end: Option<Epoch>,
}

/// Result of [TimeFrame::select]
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Row range, both included
    pub range: RangeInclusive<usize>,
    /// First selected [Epoch]
    pub start: Epoch,
    /// Last selected [Epoch]
    pub end: Epoch,
    /// Resolved [Period]
    pub period: Period,
    /// [Uptime] within the selection
    pub uptime: Uptime,
    /// Missing reports within the selection
    pub missing: Vec<Epoch>,
}

impl TimeFrame {
    /// Builds a [TimeFrame] from `YYYY-MM-DD HH:mm` descriptions.
    /// Empty strings leave the bound open.
    /// ```
    /// use paws::prelude::TimeFrame;
    /// let frame = TimeFrame::new("2020-01-15 00:00", "").unwrap();
    /// assert!(frame.start.is_some());
    /// assert!(frame.end.is_none());
    /// assert!(TimeFrame::new("2020-01-15", "").is_err());
    /// ```
    pub fn new(start: &str, end: &str) -> Result<Self, Error> {
        Ok(Self {
            start: Self::parse(Bound::Start, start)?,
            end: Self::parse(Bound::End, end)?,
        })
    }

    fn parse(bound: Bound, content: &str) -> Result<Option<Epoch>, Error> {
        if content.is_empty() {
            return Ok(None);
        }
        match parse_bound(content) {
            Some(epoch) => Ok(Some(epoch)),
            None => Err(Error::BoundFormat(bound, content.to_string())),
        }
    }

    /// Returns true if neither bound is set
    pub fn is_whole(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Resolves this [TimeFrame] within `series`, for given [Period].
    /// The [Period] may fall back to [Period::Default] when a monthly
    /// time frame does not contain any first-of-the-month midnight.
    pub fn select(&self, series: &Series, period: Period) -> Result<Selection, Error> {
        let (first, last) = match (series.first_epoch(), series.last_epoch()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(Error::EmptySeries),
        };

        for (bound, epoch) in [(Bound::Start, self.start), (Bound::End, self.end)] {
            if let Some(epoch) = epoch {
                if epoch < first || epoch > last {
                    return Err(Error::OutOfSpan {
                        bound,
                        epoch: format_bound(epoch),
                        first: format_bound(first),
                        last: format_bound(last),
                    });
                }
            }
        }

        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start >= end {
                return Err(Error::StartNotBeforeEnd {
                    start: format_bound(start),
                    end: format_bound(end),
                });
            }
        }

        // bounds are within the series
        let start_index = self
            .start
            .and_then(|epoch| series.position(epoch))
            .unwrap_or(0);
        let end_index = self
            .end
            .and_then(|epoch| series.position(epoch))
            .unwrap_or(series.len() - 1);

        let epochs = series.epochs();
        let (start, end) = (epochs[start_index], epochs[end_index]);
        let span = end - start;

        if let Some(minimum) = period.minimum_span() {
            if span < minimum {
                return Err(Error::TooShort {
                    period,
                    span,
                    minimum,
                });
            }
        }

        let period = if period == Period::Monthly && !contains_new_month(start, end) {
            #[cfg(feature = "log")]
            warn!("time frame does not contain a first-of-the-month: using default period");
            Period::Default
        } else {
            period
        };

        let range = start_index..=end_index;
        let uptime = series.uptime_within(range.clone());
        let missing = series.slice(range.clone()).missing_epochs();

        #[cfg(feature = "log")]
        if !self.is_whole() {
            info!(
                "uptime from {} to {}: {}",
                format_bound(start),
                format_bound(end),
                uptime
            );
        }

        Ok(Selection {
            range,
            start,
            end,
            period,
            uptime,
            missing,
        })
    }
}

/*
 * Returns true if a first-of-the-month midnight lies strictly within ]start, end[
 */
fn contains_new_month(start: Epoch, end: Epoch) -> bool {
    let (y, m, _, _, _, _, _) = start.to_gregorian_utc();
    let (y, m) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
    match Epoch::maybe_from_gregorian_utc(y, m, 1, 0, 0, 0, 0) {
        Ok(next) => next > start && next < end,
        Err(_) => false,
    }
}
