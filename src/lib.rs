//! This package provides a set of tools to ingest
//! 3D-PAWS weather station sensor logs, and to normalize them
//! onto a one minute time grid.
//!
//! Refer to README for examples of use.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::type_complexity)]

#[macro_use]
extern crate lazy_static;

pub mod averaging;
pub mod config;
pub mod conversion;
pub mod epoch;
pub mod merge;
pub mod observable;
pub mod parsing;
pub mod reader;
pub mod sensor;
pub mod series;
pub mod station;
pub mod timeframe;

mod error;

#[cfg(test)]
mod tests;

/// Package to include all basic structures
pub mod prelude {
    // export
    pub use crate::{
        averaging::{Averager, Averaging},
        config::{Config, ConfigError, StationLocation, Units},
        conversion::Conversions,
        error::{Error, ParsingError},
        merge::Merge,
        observable::Observable,
        parsing::{MalformedLine, RawRecord},
        reader::{IngestReport, SensorData, SensorReader},
        sensor::{Schema, Sensor},
        series::{normalize, ColumnKey, Diagnostics, SensorRow, Series, Uptime},
        station::Station,
        timeframe::{Period, Selection, TimeFrame},
    };

    // pub re-export
    pub use hifitime::{Duration, Epoch, TimeSeries};
}
