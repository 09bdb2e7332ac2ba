//! Unit conversions and derived columns
use crate::{
    observable::Observable,
    prelude::Error,
    sensor::Sensor,
    series::{ColumnKey, Series},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Conversion factors used to derive columns
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Conversions {
    /// [m.s^-1] to [km.h^-1]
    pub mps_to_kmph: f64,
    /// [m.s^-1] to [mi.h^-1]
    pub mps_to_mph: f64,
    /// [m.s^-1] to [kts]
    pub mps_to_knots: f64,
    /// [hPa] to [inHg]
    pub hpa_to_inhg: f64,
    /// [mm] to [inches]
    pub mm_to_inches: f64,
}

impl Default for Conversions {
    fn default() -> Self {
        Self {
            mps_to_kmph: 3.6,
            mps_to_mph: 2.23694,
            mps_to_knots: 1.94384,
            hpa_to_inhg: 0.02953,
            mm_to_inches: 1.0 / 25.4,
        }
    }
}

impl Conversions {
    /// Appends the derived columns of `sensor` to `series`.
    /// Missing values stay missing.
    pub fn apply(&self, sensor: Sensor, series: &mut Series) -> Result<(), Error> {
        let key = |observable| ColumnKey::new(sensor, observable);
        match sensor {
            Sensor::Bmp => {
                let source = key(Observable::StationPressure);
                let factor = self.hpa_to_inhg;
                series.derive_column(&source, key(Observable::StationPressureInHg), |hpa| {
                    Some(hpa * factor)
                })?;
            },
            Sensor::RainGauge => {
                let source = key(Observable::Rain);
                // dry minutes only: tells "no rain" from "not reporting"
                series.derive_column(&source, key(Observable::NoRain), |mm| {
                    if mm > 0.0 {
                        None
                    } else {
                        Some(mm)
                    }
                })?;
                let factor = self.mm_to_inches;
                series.derive_column(&source, key(Observable::RainInches), |mm| {
                    Some(mm * factor)
                })?;
            },
            Sensor::Anemometer => {
                let source = key(Observable::WindSpeed);
                for (target, factor) in [
                    (Observable::WindSpeedKmh, self.mps_to_kmph),
                    (Observable::WindSpeedMph, self.mps_to_mph),
                    (Observable::WindSpeedKnots, self.mps_to_knots),
                ] {
                    series.derive_column(&source, key(target), |mps| Some(mps * factor))?;
                }
            },
            _ => {},
        }
        Ok(())
    }
}
