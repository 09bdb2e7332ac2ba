//! Sensor families of the station network
mod schema;

pub use schema::{Field, Schema, Seconds, DATE_TOKENS};

use crate::{config::ConfigError, config::Units, observable::Observable};
use strum::{EnumIter, IntoEnumIterator};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use Observable::*;

const PRESSURE_FIELDS: &[Field] = &[
    Field::Value(TemperatureCelsius),
    Field::Value(TemperatureFahrenheit),
    Field::Value(StationPressure),
    Field::Value(SeaLevelPressure),
    Field::Value(SeaLevelPressureInHg),
    Field::Value(Altitude),
];

const HUMIDITY_FIELDS: &[Field] = &[
    Field::Value(TemperatureCelsius),
    Field::Value(TemperatureFahrenheit),
    Field::Value(RelativeHumidity),
];

const TEMPERATURE_FIELDS: &[Field] = &[
    Field::Value(TemperatureCelsius),
    Field::Value(TemperatureFahrenheit),
];

const RADIATION_FIELDS: &[Field] = &[
    Field::Value(Visible),
    Field::Value(Infrared),
    Field::Value(Ultraviolet),
    Field::Value(UltravioletIndex),
];

const RAIN_FIELDS: &[Field] = &[Field::Value(Rain)];

// vane lines wrap the azimuth with two auxiliary tokens
const WIND_VANE_FIELDS: &[Field] = &[Field::Unused, Field::Value(WindDirection), Field::Unused];

const ANEMOMETER_FIELDS: &[Field] = &[Field::Value(WindSpeed)];

/// Sensor families deployed across the network
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sensor {
    /// BMP180 / BMP280 / BME pressure and temperature sensor
    Bmp,
    /// HTU21D humidity and temperature sensor
    Htu21d,
    /// MCP9808 temperature sensor
    Mcp9808,
    /// SI1145 radiation sensor
    Si1145,
    /// Rain gauge (tipping bucket)
    RainGauge,
    /// Wind vane (wind direction)
    WindVane,
    /// Anemometer (wind speed)
    Anemometer,
}

impl std::fmt::Display for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Bmp => f.write_str("bmp"),
            Self::Htu21d => f.write_str("htu21d"),
            Self::Mcp9808 => f.write_str("mcp9808"),
            Self::Si1145 => f.write_str("si1145"),
            Self::RainGauge => f.write_str("rain"),
            Self::WindVane => f.write_str("wind_vane"),
            Self::Anemometer => f.write_str("anemometer"),
        }
    }
}

impl std::str::FromStr for Sensor {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bmp" | "bmp180" | "bmp280" | "bme" | "bme280" => Ok(Self::Bmp),
            "htu21d" => Ok(Self::Htu21d),
            "mcp9808" => Ok(Self::Mcp9808),
            "si1145" => Ok(Self::Si1145),
            "rain" | "rain_gauge" => Ok(Self::RainGauge),
            "wind_vane" | "winddir" => Ok(Self::WindVane),
            "anemometer" | "windspd" => Ok(Self::Anemometer),
            _ => Err(ConfigError::UnknownSensor {
                name: s.to_string(),
                valid: crate::config::choices(Self::iter()),
            }),
        }
    }
}

impl Sensor {
    /// Returns the line [Schema] of this family
    pub fn schema(&self) -> Schema {
        match self {
            Self::Bmp => Schema {
                fields: PRESSURE_FIELDS,
                seconds: Seconds::Never,
            },
            Self::Htu21d => Schema {
                fields: HUMIDITY_FIELDS,
                seconds: Seconds::Never,
            },
            Self::Mcp9808 => Schema {
                fields: TEMPERATURE_FIELDS,
                seconds: Seconds::Never,
            },
            Self::Si1145 => Schema {
                fields: RADIATION_FIELDS,
                seconds: Seconds::Never,
            },
            Self::RainGauge => Schema {
                fields: RAIN_FIELDS,
                seconds: Seconds::Optional,
            },
            Self::WindVane => Schema {
                fields: WIND_VANE_FIELDS,
                seconds: Seconds::Optional,
            },
            Self::Anemometer => Schema {
                fields: ANEMOMETER_FIELDS,
                seconds: Seconds::Optional,
            },
        }
    }

    /// Columns derived by the reader, after normalization
    pub fn derived(&self) -> &'static [Observable] {
        match self {
            Self::Bmp => &[StationPressureInHg],
            Self::RainGauge => &[NoRain, RainInches],
            Self::Anemometer => &[WindSpeedKmh, WindSpeedMph, WindSpeedKnots],
            _ => &[],
        }
    }

    /// All variables made available by this family: stored fields first
    /// (in schema order), then derived columns.
    pub fn variables(&self) -> Vec<Observable> {
        self.schema()
            .observables()
            .chain(self.derived().iter().copied())
            .collect()
    }

    /// [Units] that may be selected for this family
    pub fn units(&self) -> &'static [Units] {
        match self {
            Self::RainGauge => &[Units::Millimeters, Units::Inches],
            Self::Anemometer => &[
                Units::MetersPerSecond,
                Units::KilometersPerHour,
                Units::MilesPerHour,
                Units::Knots,
            ],
            _ => &[],
        }
    }

    /// Returns true for the pressure sensor family
    pub fn is_pressure_sensor(&self) -> bool {
        matches!(self, Self::Bmp)
    }

    /// Identifies a sensor family from a data folder name.
    /// ```
    /// use paws::prelude::Sensor;
    /// assert_eq!(Sensor::from_folder_name("BMP280"), Some(Sensor::Bmp));
    /// assert_eq!(Sensor::from_folder_name("tipping_bucket"), Some(Sensor::RainGauge));
    /// assert_eq!(Sensor::from_folder_name("windspd"), Some(Sensor::Anemometer));
    /// assert_eq!(Sensor::from_folder_name("camera"), None);
    /// ```
    pub fn from_folder_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        let any = |keys: &[&str]| keys.iter().any(|key| name.contains(key));
        if any(&["bmp", "bme"]) {
            Some(Self::Bmp)
        } else if any(&["htu"]) {
            Some(Self::Htu21d)
        } else if any(&["mcp"]) {
            Some(Self::Mcp9808)
        } else if any(&["1145", "radiation"]) {
            Some(Self::Si1145)
        } else if any(&["rain", "tip", "bucket", "gauge"]) {
            Some(Self::RainGauge)
        } else if any(&["vane", "dir"]) {
            Some(Self::WindVane)
        } else if any(&["speed", "spd", "anemometer"]) {
            Some(Self::Anemometer)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn schemas() {
        for (sensor, full, short) in [
            (Sensor::Bmp, 11, None),
            (Sensor::Htu21d, 8, None),
            (Sensor::Mcp9808, 7, None),
            (Sensor::Si1145, 9, None),
            (Sensor::RainGauge, 7, Some(6)),
            (Sensor::WindVane, 9, Some(8)),
            (Sensor::Anemometer, 7, Some(6)),
        ] {
            let schema = sensor.schema();
            assert_eq!(schema.full_len(), full, "{}", sensor);
            assert_eq!(schema.accepts(full), Some(short.is_some()), "{}", sensor);
            if let Some(short) = short {
                assert_eq!(schema.accepts(short), Some(false), "{}", sensor);
            } else {
                assert_eq!(schema.accepts(full - 1), None, "{}", sensor);
            }
        }
    }

    #[test]
    fn primary_variables() {
        assert_eq!(Sensor::Bmp.variables()[0], TemperatureCelsius);
        assert_eq!(Sensor::WindVane.variables(), vec![WindDirection]);
        assert_eq!(
            Sensor::RainGauge.variables(),
            vec![Rain, NoRain, RainInches]
        );
    }

    #[test]
    fn from_str() {
        assert_eq!(Sensor::from_str("BMP280").unwrap(), Sensor::Bmp);
        assert_eq!(Sensor::from_str("bmp180").unwrap(), Sensor::Bmp);
        assert_eq!(Sensor::from_str("rain").unwrap(), Sensor::RainGauge);
        assert_eq!(Sensor::from_str("wind_vane").unwrap(), Sensor::WindVane);
        for sensor in Sensor::iter() {
            assert_eq!(Sensor::from_str(&sensor.to_string()).unwrap(), sensor);
        }
        match Sensor::from_str("bmp390") {
            Err(ConfigError::UnknownSensor { name, valid }) => {
                assert_eq!(name, "bmp390");
                assert!(valid.contains("htu21d"));
                assert!(valid.contains("anemometer"));
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn folder_names() {
        for (name, expected) in [
            ("bmp280", Some(Sensor::Bmp)),
            ("BME680", Some(Sensor::Bmp)),
            ("htu21d", Some(Sensor::Htu21d)),
            ("MCP9808", Some(Sensor::Mcp9808)),
            ("si1145", Some(Sensor::Si1145)),
            ("radiation", Some(Sensor::Si1145)),
            ("rain", Some(Sensor::RainGauge)),
            ("winddir", Some(Sensor::WindVane)),
            ("wind_vane", Some(Sensor::WindVane)),
            ("anemometer", Some(Sensor::Anemometer)),
            ("wind_speed", Some(Sensor::Anemometer)),
            ("logs", None),
        ] {
            assert_eq!(Sensor::from_folder_name(name), expected, "{}", name);
        }
    }
}
