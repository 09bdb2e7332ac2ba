//! Sensor measurements
use strum::{EnumIter, EnumString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Observable] names one measurement column.
/// String representations match the variable names used
/// throughout the station network tooling.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, EnumIter, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Observable {
    /// Temperature in [°C]
    #[strum(serialize = "temp_C")]
    TemperatureCelsius,
    /// Temperature in [°F]
    #[strum(serialize = "temp_F")]
    TemperatureFahrenheit,
    /// Station pressure in [hPa]
    #[strum(serialize = "station_P")]
    StationPressure,
    /// Station pressure in [inHg]
    #[strum(serialize = "station_P_inHg")]
    StationPressureInHg,
    /// Sea-level pressure in [hPa]
    #[strum(serialize = "SLP_hPa")]
    SeaLevelPressure,
    /// Sea-level pressure in [inHg]
    #[strum(serialize = "SLP_inHg")]
    SeaLevelPressureInHg,
    /// Station altitude in [m]
    #[strum(serialize = "alt")]
    Altitude,
    /// Relative humidity in [%]
    #[strum(serialize = "rel_hum")]
    RelativeHumidity,
    /// Visible light in [W.m^-2]
    #[strum(serialize = "vis")]
    Visible,
    /// Infrared radiation in [W.m^-2]
    #[strum(serialize = "ir")]
    Infrared,
    /// Ultraviolet radiation in [W.m^-2]
    #[strum(serialize = "uv")]
    Ultraviolet,
    /// Ultraviolet index (unitless)
    #[strum(serialize = "uvi")]
    UltravioletIndex,
    /// Precipitation amount in [mm]
    #[strum(serialize = "rain")]
    Rain,
    /// Precipitation amount in [inches]
    #[strum(serialize = "rain_in")]
    RainInches,
    /// [Observable::Rain] where any positive amount is masked out:
    /// separates "reporting, but dry" from "not reporting".
    #[strum(serialize = "no_rain")]
    NoRain,
    /// Wind azimuth, from where the wind blows, in [°]
    #[strum(serialize = "wind_dir")]
    WindDirection,
    /// Wind speed in [m.s^-1]
    #[strum(serialize = "wind_speed")]
    WindSpeed,
    /// Wind speed in [km.h^-1]
    #[strum(serialize = "wind_speed_kmph")]
    WindSpeedKmh,
    /// Wind speed in [mi.h^-1]
    #[strum(serialize = "wind_speed_mph")]
    WindSpeedMph,
    /// Wind speed in [kts]
    #[strum(serialize = "wind_speed_kts")]
    WindSpeedKnots,
}

impl Observable {
    /// Returns true if this [Observable] is never read from a file,
    /// but derived from another column
    pub fn is_derived(&self) -> bool {
        matches!(
            self,
            Self::StationPressureInHg
                | Self::RainInches
                | Self::NoRain
                | Self::WindSpeedKmh
                | Self::WindSpeedMph
                | Self::WindSpeedKnots
        )
    }

    /// Returns true if this is a temperature expressed in Fahrenheit
    pub fn is_fahrenheit(&self) -> bool {
        matches!(self, Self::TemperatureFahrenheit)
    }
}
