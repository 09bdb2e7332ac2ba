use std::path::PathBuf;
use thiserror::Error;

use crate::{
    config::ConfigError, merge::Error as MergeError, sensor::Sensor,
    timeframe::Error as TimeFrameError,
};

/// Errors that may rise when interpreting a single line.
/// They are never fatal: the line is dropped and accounted for.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    #[error("expecting {expected} tokens, found {found}")]
    TokenCount { expected: String, found: usize },
    #[error("failed to parse year from \"{0}\"")]
    YearField(String),
    #[error("failed to parse month from \"{0}\"")]
    MonthField(String),
    #[error("failed to parse day from \"{0}\"")]
    DayField(String),
    #[error("failed to parse hours from \"{0}\"")]
    HoursField(String),
    #[error("failed to parse minutes from \"{0}\"")]
    MinutesField(String),
    #[error("failed to parse seconds from \"{0}\"")]
    SecondsField(String),
    #[error("invalid calendar date {0}")]
    InvalidDate(String),
    #[error("failed to parse value from \"{0}\"")]
    ValueField(String),
}

/// Errors that abort the ingestion pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read \"{path}\": {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid file pattern")]
    Pattern(#[from] glob::PatternError),
    #[error("failed to access \"{0}\"")]
    Glob(PathBuf),
    /// Field arrays of unequal length after parsing.
    /// This is a parser invariant violation.
    #[error("{sensor}: field lengths mismatch {lengths:?}")]
    SchemaMismatch {
        sensor: Sensor,
        lengths: Vec<usize>,
    },
    /// Row width does not match the column set
    #[error("row width mismatch: {found} values for {expected} columns")]
    RowWidth { expected: usize, found: usize },
    /// Not a single usable row
    #[error("{sensor}: no data ({files} file(s) read, {skipped} line(s) skipped). Check the directory path and the data files column count")]
    NoData {
        sensor: Sensor,
        files: usize,
        skipped: usize,
    },
    /// Rows given to the normalizer without a sensor context
    #[error("no data")]
    EmptySeries,
    #[error("no data in the selected time frame for: {0}")]
    NoDataInTimeFrame(String),
    #[error("invalid time frame: {0}")]
    TimeFrame(#[from] TimeFrameError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("merge error: {0}")]
    Merge(#[from] MergeError),
    #[error("cannot determine sensor type from folder \"{0}\"")]
    UnknownSensorFolder(String),
    #[error("no sensor folder found in \"{0}\"")]
    NoSensorFolder(PathBuf),
    #[error("more than one pressure sensor folder in \"{0}\"")]
    MultiplePressureFolders(PathBuf),
}
