//! Ingestion and processing options
use std::fmt::Display;
use std::str::FromStr;

use itertools::Itertools;
use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

use crate::{averaging::Averaging, conversion::Conversions, observable::Observable, sensor::Sensor};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown sensor \"{name}\", accepted sensor names are: {valid}")]
    UnknownSensor { name: String, valid: String },
    #[error("unknown units \"{name}\", accepted unit identifiers are: {valid}")]
    UnknownUnits { name: String, valid: String },
    #[error("\"{units}\" is not an accepted unit identifier for {sensor}, accepted: {valid}")]
    UnsupportedUnits {
        sensor: Sensor,
        units: Units,
        valid: String,
    },
    #[error("unknown variable \"{name}\", accepted variable names are: {valid}")]
    UnknownVariable { name: String, valid: String },
    #[error("\"{variable}\" is not an accepted variable name for {sensor}, accepted: {valid}")]
    UnsupportedVariable {
        sensor: Sensor,
        variable: Observable,
        valid: String,
    },
    #[error("averaging option \"{name}\" not recognized, accepted: {valid}")]
    UnknownAveraging { name: String, valid: String },
    #[error("unknown period \"{name}\", accepted: {valid}")]
    UnknownPeriod { name: String, valid: String },
    #[error("averaging window must be an integer greater than or equal to 1")]
    AveragingWindow,
    #[error("latitude {0} out of range [-90, 90[")]
    Latitude(f64),
    #[error("longitude {0} out of range [-180, 180]")]
    Longitude(f64),
    #[error("elevation {0} out of range [0, 8900] m")]
    Elevation(f64),
}

/// Lists valid choices, for error reporting
pub(crate) fn choices<T: Display>(iter: impl Iterator<Item = T>) -> String {
    iter.map(|t| t.to_string()).join(", ")
}

/// Parses an option by its textual representation
pub(crate) fn parse_choice<T: IntoEnumIterator + Display>(s: &str) -> Option<T> {
    let s = s.trim().to_lowercase();
    T::iter().find(|t| t.to_string() == s)
}

/// Measurement units that may be selected, for families
/// that report in several units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Units {
    /// Millimeters (precipitation)
    #[strum(serialize = "mm")]
    Millimeters,
    /// Inches (precipitation)
    #[strum(serialize = "inches")]
    Inches,
    /// Meters per second (wind speed)
    #[strum(serialize = "mps")]
    MetersPerSecond,
    /// Kilometers per hour (wind speed)
    #[strum(serialize = "kmph")]
    KilometersPerHour,
    /// Miles per hour (wind speed)
    #[strum(serialize = "mph")]
    MilesPerHour,
    /// Knots (wind speed)
    #[strum(serialize = "kts")]
    Knots,
}

impl FromStr for Units {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s).ok_or_else(|| ConfigError::UnknownUnits {
            name: s.to_string(),
            valid: choices(Self::iter()),
        })
    }
}

impl Units {
    /// Column holding values in these units, for given [Sensor]
    pub fn observable(&self, sensor: Sensor) -> Option<Observable> {
        match (sensor, self) {
            (Sensor::RainGauge, Self::Millimeters) => Some(Observable::Rain),
            (Sensor::RainGauge, Self::Inches) => Some(Observable::RainInches),
            (Sensor::Anemometer, Self::MetersPerSecond) => Some(Observable::WindSpeed),
            (Sensor::Anemometer, Self::KilometersPerHour) => Some(Observable::WindSpeedKmh),
            (Sensor::Anemometer, Self::MilesPerHour) => Some(Observable::WindSpeedMph),
            (Sensor::Anemometer, Self::Knots) => Some(Observable::WindSpeedKnots),
            _ => None,
        }
    }
}

/// Geodetic station location
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StationLocation {
    /// Latitude in decimal degrees, in [-90, 90[
    pub latitude: f64,
    /// Longitude in decimal degrees, in [-180, 180]
    pub longitude: f64,
    /// Elevation in meters, in [0, 8900]
    pub elevation: f64,
}

impl StationLocation {
    /// Builds a new [StationLocation], verifying all coordinates.
    /// ```
    /// use paws::prelude::StationLocation;
    /// assert!(StationLocation::new(40.0, -105.2, 1650.0).is_ok());
    /// assert!(StationLocation::new(90.0, -105.2, 1650.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Result<Self, ConfigError> {
        let location = Self {
            latitude,
            longitude,
            elevation,
        };
        location.validate()?;
        Ok(location)
    }

    /// Verifies all coordinates
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-90.0..90.0).contains(&self.latitude) {
            return Err(ConfigError::Latitude(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ConfigError::Longitude(self.longitude));
        }
        if !(0.0..=8900.0).contains(&self.elevation) {
            return Err(ConfigError::Elevation(self.elevation));
        }
        Ok(())
    }
}

/// [Config] is passed to the readers. It describes
/// what the caller is interested in and how to process it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Variable of interest
    #[cfg_attr(feature = "serde", serde(default))]
    pub variable: Option<Observable>,
    /// Units of interest, for families that support several units
    #[cfg_attr(feature = "serde", serde(default))]
    pub units: Option<Units>,
    /// Averaging mode
    #[cfg_attr(feature = "serde", serde(default))]
    pub averaging: Averaging,
    /// Averaging window, in minutes
    #[cfg_attr(feature = "serde", serde(default = "default_window"))]
    pub window: usize,
    /// Station location, required when preparing exchange records
    #[cfg_attr(feature = "serde", serde(default))]
    pub station: Option<StationLocation>,
    /// Unit conversion factors
    #[cfg_attr(feature = "serde", serde(default))]
    pub conversions: Conversions,
}

fn default_window() -> usize {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variable: None,
            units: None,
            averaging: Averaging::default(),
            window: default_window(),
            station: None,
            conversions: Conversions::default(),
        }
    }
}

impl Config {
    /// Copies and sets the variable of interest
    pub fn with_variable(&self, variable: Observable) -> Self {
        let mut s = self.clone();
        s.variable = Some(variable);
        s
    }

    /// Copies and sets the units of interest
    pub fn with_units(&self, units: Units) -> Self {
        let mut s = self.clone();
        s.units = Some(units);
        s
    }

    /// Copies and sets the averaging mode and window (in minutes)
    pub fn with_averaging(&self, averaging: Averaging, window: usize) -> Self {
        let mut s = self.clone();
        s.averaging = averaging;
        s.window = window;
        s
    }

    /// Copies and sets the station location
    pub fn with_station(&self, station: StationLocation) -> Self {
        let mut s = self.clone();
        s.station = Some(station);
        s
    }

    /// Averaging mode that actually applies: a window
    /// of one sample is the same as no averaging.
    pub fn effective_averaging(&self) -> Averaging {
        if self.window <= 1 {
            Averaging::None
        } else {
            self.averaging
        }
    }

    /// Verifies this [Config] for given [Sensor]
    pub fn validate(&self, sensor: Sensor) -> Result<(), ConfigError> {
        if let Some(variable) = self.variable {
            let valid = sensor.variables();
            if !valid.contains(&variable) {
                return Err(ConfigError::UnsupportedVariable {
                    sensor,
                    variable,
                    valid: choices(valid.iter()),
                });
            }
        }
        if let Some(units) = self.units {
            let valid = sensor.units();
            if !valid.contains(&units) {
                return Err(ConfigError::UnsupportedUnits {
                    sensor,
                    units,
                    valid: choices(valid.iter()),
                });
            }
        }
        if self.averaging != Averaging::None && self.window < 1 {
            return Err(ConfigError::AveragingWindow);
        }
        if let Some(station) = self.station {
            station.validate()?;
        }
        Ok(())
    }

    /// Resolves the column of interest, for given [Sensor]:
    /// the selected variable, the column matching the selected units,
    /// or the primary column.
    pub fn column_of_interest(&self, sensor: Sensor) -> Option<Observable> {
        if let Some(variable) = self.variable {
            return Some(variable);
        }
        if let Some(observable) = self.units.and_then(|units| units.observable(sensor)) {
            return Some(observable);
        }
        sensor.schema().observables().next()
    }
}

/// Parses a variable name, listing the variables of `sensor` on failure
pub fn parse_variable(sensor: Sensor, name: &str) -> Result<Observable, ConfigError> {
    let valid = sensor.variables();
    match Observable::from_str(name.trim()) {
        Ok(observable) if valid.contains(&observable) => Ok(observable),
        Ok(observable) => Err(ConfigError::UnsupportedVariable {
            sensor,
            variable: observable,
            valid: choices(valid.iter()),
        }),
        Err(_) => Err(ConfigError::UnknownVariable {
            name: name.to_string(),
            valid: choices(valid.iter()),
        }),
    }
}
