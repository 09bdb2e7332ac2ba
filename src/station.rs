//! Station assembly: all sensors of one station, joined in time
use std::path::Path;

use itertools::Itertools;

use crate::{
    config::{Config, StationLocation},
    merge::Merge,
    observable::Observable,
    prelude::Error,
    reader::{SensorData, SensorReader},
    sensor::Sensor,
    series::{ColumnKey, Series},
    timeframe::{Period, TimeFrame},
};

#[cfg(feature = "log")]
use log::{debug, info};

/// [Station] gathers the data of every sensor folder
/// found within a station directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Per sensor data, in folder name order
    pub sensors: Vec<SensorData>,
    /// All sensors, joined in time
    pub series: Series,
    /// Station location, if known
    pub location: Option<StationLocation>,
}

impl Station {
    /// Reads all sensor folders within `parent`. Each folder name
    /// must identify one [Sensor] family. Radiation data is not
    /// part of exchange records and is not read.
    pub fn read<P: AsRef<Path>>(parent: P, config: &Config) -> Result<Self, Error> {
        let parent = parent.as_ref();
        if let Some(location) = config.station {
            location.validate()?;
        }

        let mut folders = Vec::new();
        let io_error = |source| Error::Io {
            path: parent.to_path_buf(),
            source,
        };
        for entry in std::fs::read_dir(parent).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.is_dir() {
                folders.push(path);
            }
        }
        folders.sort();

        let mut detected = Vec::<(Sensor, &Path)>::with_capacity(folders.len());
        for folder in folders.iter() {
            let name = folder
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            match Sensor::from_folder_name(&name) {
                Some(Sensor::Si1145) => {
                    #[cfg(feature = "log")]
                    debug!("{}: radiation data not required, skipping", name);
                },
                Some(sensor) => detected.push((sensor, folder.as_path())),
                None => return Err(Error::UnknownSensorFolder(name)),
            }
        }

        let pressure_folders = detected
            .iter()
            .filter(|(sensor, _)| sensor.is_pressure_sensor())
            .count();
        if pressure_folders > 1 {
            return Err(Error::MultiplePressureFolders(parent.to_path_buf()));
        }

        // variable and units selections only make sense for one sensor
        let sensor_config = Config {
            conversions: config.conversions,
            ..Config::default()
        };

        let mut sensors = Vec::with_capacity(detected.len());
        let mut series: Option<Series> = None;
        for (sensor, folder) in detected {
            let reader = SensorReader::new(sensor, sensor_config.clone())?;
            let data = reader.read_dir(folder, "*")?;
            series = match series {
                Some(mut series) => {
                    series.merge_mut(&data.series)?;
                    Some(series)
                },
                None => Some(data.series.clone()),
            };
            sensors.push(data);
        }

        let series = series.ok_or_else(|| Error::NoSensorFolder(parent.to_path_buf()))?;

        #[cfg(feature = "log")]
        info!(
            "station: {} sensor(s), {} column(s), {} minute(s)",
            sensors.len(),
            series.columns().len(),
            series.len()
        );

        Ok(Self {
            sensors,
            series,
            location: config.station,
        })
    }

    /// Sensor families of this station
    pub fn sensor_families(&self) -> Vec<Sensor> {
        self.sensors.iter().map(|data| data.sensor).collect()
    }

    /// Returns true if this column is forwarded to exchange records
    pub fn is_exchanged(key: &ColumnKey) -> bool {
        let dropped = matches!(
            key.observable,
            Observable::SeaLevelPressure
                | Observable::SeaLevelPressureInHg
                | Observable::Altitude
                | Observable::TemperatureFahrenheit
        );
        !dropped && !key.observable.is_derived()
    }

    /// Prepares the input of the exchange record writer:
    /// the columns it requires, restricted to `frame`.
    /// Every remaining column must hold at least one value.
    pub fn exchange_input(&self, frame: &TimeFrame) -> Result<Series, Error> {
        let selection = frame.select(&self.series, Period::Default)?;
        let mut series = self.series.slice(selection.range);
        series.retain_columns(Self::is_exchanged);

        let empty = series
            .columns()
            .iter()
            .filter(|key| {
                series
                    .column(key)
                    .map(|values| values.iter().all(|value| value.is_none()))
                    .unwrap_or(true)
            })
            .map(|key| key.to_string())
            .collect::<Vec<_>>();

        if !empty.is_empty() {
            return Err(Error::NoDataInTimeFrame(empty.iter().join(", ")));
        }
        Ok(series)
    }
}
