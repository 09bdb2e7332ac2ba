//! Expected epochs, for series verification
use std::vec::IntoIter;

use hifitime::{Epoch, TimeSeries};

use crate::{epoch::minute, tests::toolkit::utc};

#[derive(Debug, Clone)]
pub enum TestTimeFrame {
    Erratic(IntoIter<Epoch>),
    EvenlySpaced(TimeSeries),
}

impl TestTimeFrame {
    /// One minute steps, both ends included.
    /// Epochs are described in UTC, like "2020-01-15T00:00:00".
    pub fn from_inclusive(start: &str, end: &str) -> Self {
        Self::EvenlySpaced(TimeSeries::inclusive(utc(start), utc(end), minute()))
    }

    /// Comma separated UTC epochs
    pub fn from_erratic_csv(csv: &str) -> Self {
        let epochs = csv.split(',').map(utc).collect::<Vec<_>>();
        Self::Erratic(epochs.into_iter())
    }
}

impl Iterator for TestTimeFrame {
    type Item = Epoch;
    fn next(&mut self) -> Option<Epoch> {
        match self {
            Self::Erratic(i) => i.next(),
            Self::EvenlySpaced(i) => i.next(),
        }
    }
}
