//! Declarative line layouts
use crate::observable::Observable;

/// Number of leading date and time tokens, seconds excluded:
/// month, day, year, hour, minute.
pub const DATE_TOKENS: usize = 5;

/// Measurement field, following the date and time tokens
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    /// Field we read and store
    Value(Observable),
    /// Field present on the line, that we do not interpret
    Unused,
}

/// Whether lines carry a seconds token, after the minutes
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Seconds {
    /// Lines never carry seconds
    Never,
    /// Lines may or may not carry seconds: both layouts
    /// coexist across the network for the same sensor
    Optional,
}

/// [Schema] describes the layout of one line, for one sensor family
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Measurement fields, in order of appearance
    pub fields: &'static [Field],
    /// Seconds token support
    pub seconds: Seconds,
}

impl Schema {
    /// Token count of a complete line (seconds included, when supported)
    pub fn full_len(&self) -> usize {
        match self.seconds {
            Seconds::Never => DATE_TOKENS + self.fields.len(),
            Seconds::Optional => DATE_TOKENS + 1 + self.fields.len(),
        }
    }

    /// Returns `Some(true)` if a line made of `tokens` tokens is valid
    /// and carries seconds, `Some(false)` if valid without seconds,
    /// None if invalid.
    pub fn accepts(&self, tokens: usize) -> Option<bool> {
        let full = self.full_len();
        match self.seconds {
            Seconds::Never => {
                if tokens == full {
                    Some(false)
                } else {
                    None
                }
            },
            Seconds::Optional => {
                if tokens == full {
                    Some(true)
                } else if tokens + 1 == full {
                    Some(false)
                } else {
                    None
                }
            },
        }
    }

    /// Describes the expected token count(s)
    pub fn expected(&self) -> String {
        match self.seconds {
            Seconds::Never => self.full_len().to_string(),
            Seconds::Optional => format!("{} or {}", self.full_len(), self.full_len() - 1),
        }
    }

    /// Iterates the [Observable]s we store, in order of appearance
    pub fn observables(&self) -> impl Iterator<Item = Observable> + '_ {
        self.fields.iter().filter_map(|field| match field {
            Field::Value(observable) => Some(*observable),
            Field::Unused => None,
        })
    }

    /// Number of stored values
    pub fn width(&self) -> usize {
        self.observables().count()
    }
}
