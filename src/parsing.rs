//! Record parser: one text line, one sensor [Schema]
use std::path::{Path, PathBuf};

use crate::{
    epoch::parse_utc,
    prelude::{Epoch, ParsingError},
    sensor::{Field, Schema, DATE_TOKENS},
    series::SensorRow,
};

/// [RawRecord] is one line, split into whitespace delimited tokens,
/// whose token count matches the expected [Schema].
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord<'a> {
    tokens: Vec<&'a str>,
    seconds: bool,
    schema: Schema,
}

impl<'a> RawRecord<'a> {
    /// Splits `line` and checks its token count against `schema`.
    /// Lines with the optional seconds token and lines without it are
    /// both accepted, for families that support it.
    /// ```
    /// use paws::prelude::{RawRecord, Sensor};
    /// let schema = Sensor::Anemometer.schema();
    /// let with = RawRecord::parse("01 15 2020 00 00 12 5.0", schema).unwrap();
    /// let without = RawRecord::parse("01 15 2020 00 00 5.0", schema).unwrap();
    /// assert!(with.has_seconds());
    /// assert!(!without.has_seconds());
    /// assert!(RawRecord::parse("01 15 2020 00", schema).is_err());
    /// ```
    pub fn parse(line: &'a str, schema: Schema) -> Result<Self, ParsingError> {
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        match schema.accepts(tokens.len()) {
            Some(seconds) => Ok(Self {
                tokens,
                seconds,
                schema,
            }),
            None => Err(ParsingError::TokenCount {
                expected: schema.expected(),
                found: tokens.len(),
            }),
        }
    }

    /// Returns true if this line carries a seconds token
    pub fn has_seconds(&self) -> bool {
        self.seconds
    }

    /// Raw tokens
    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    /// Builds the timestamp of this line, rounded to the nearest
    /// minute when seconds are present.
    pub fn epoch(&self) -> Result<Epoch, ParsingError> {
        // month, day, year, hour, minute, [second]
        let t = &self.tokens;
        let second = if self.seconds {
            Some(t[DATE_TOKENS])
        } else {
            None
        };
        parse_utc(t[2], t[0], t[1], t[3], t[4], second)
    }

    /// Interprets the measurement fields we store. `NaN` is read as
    /// a missing value.
    pub fn values(&self) -> Result<Vec<Option<f64>>, ParsingError> {
        let offset = if self.seconds {
            DATE_TOKENS + 1
        } else {
            DATE_TOKENS
        };
        self.schema
            .fields
            .iter()
            .zip(self.tokens[offset..].iter())
            .filter_map(|(field, token)| match field {
                Field::Value(_) => Some(parse_value(token)),
                Field::Unused => None,
            })
            .collect()
    }

    /// Converts to a [SensorRow]
    pub fn to_row(&self) -> Result<SensorRow, ParsingError> {
        Ok(SensorRow {
            epoch: self.epoch()?,
            values: self.values()?,
        })
    }
}

fn parse_value(token: &str) -> Result<Option<f64>, ParsingError> {
    let value = token
        .parse::<f64>()
        .map_err(|_| ParsingError::ValueField(token.to_string()))?;
    if value.is_nan() {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

/// Line we could not interpret, dropped from the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedLine {
    /// File this line originates from
    pub path: PathBuf,
    /// Line number (starting at 1)
    pub line: usize,
    /// Reason
    pub error: ParsingError,
}

impl MalformedLine {
    pub(crate) fn new(path: &Path, line: usize, error: ParsingError) -> Self {
        Self {
            path: path.to_path_buf(),
            line,
            error,
        }
    }
}

impl std::fmt::Display for MalformedLine {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.path.display(), self.line, self.error)
    }
}
