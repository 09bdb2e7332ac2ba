//! Sensor readers: from a set of log files to a normalized [Series]
use std::path::{Path, PathBuf};

use glob::Pattern;
use itertools::Itertools;

use crate::{
    averaging::Averager,
    config::Config,
    parsing::{MalformedLine, RawRecord},
    prelude::{Epoch, Error},
    sensor::Sensor,
    series::{normalize, ColumnKey, Diagnostics, SensorRow, Series},
};

#[cfg(feature = "log")]
use log::{debug, info, warn};

/// Everything that happened while reading one sensor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    /// Files read, in reading order
    pub files: Vec<PathBuf>,
    /// Dropped lines
    pub malformed: Vec<MalformedLine>,
    /// Files that contained at least one dropped line
    pub problem_files: Vec<PathBuf>,
    /// Normalization diagnostics
    pub diagnostics: Diagnostics,
}

impl IngestReport {
    /// Number of lines skipped
    pub fn skipped(&self) -> usize {
        self.malformed.len()
    }
}

/// Normalized data of one sensor
#[derive(Debug, Clone, PartialEq)]
pub struct SensorData {
    pub sensor: Sensor,
    /// Normalized [Series], with derived columns
    pub series: Series,
    pub report: IngestReport,
}

impl SensorData {
    /// Timestamps of missing reports
    pub fn missing(&self) -> &[Epoch] {
        &self.report.diagnostics.missing
    }
}

/// Lists files matching `wildcard` within `directory`, in lexical order
pub fn list_files<P: AsRef<Path>>(directory: P, wildcard: &str) -> Result<Vec<PathBuf>, Error> {
    let directory = directory.as_ref().to_string_lossy();
    let pattern = if directory.is_empty() {
        wildcard.to_string()
    } else {
        format!(
            "{}/{}",
            Pattern::escape(directory.trim_end_matches('/')),
            wildcard
        )
    };
    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| Error::Glob(e.path().to_path_buf()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// [SensorReader] runs the ingestion pipeline for one [Sensor] family.
/// ```
/// use paws::prelude::*;
/// use std::path::PathBuf;
///
/// let reader = SensorReader::new(Sensor::Anemometer, Config::default()).unwrap();
/// let data = reader
///     .ingest(vec![(
///         PathBuf::from("anemometer.log"),
///         "01 15 2020 00 00 5.0\n01 15 2020 00 02 6.0\n".to_string(),
///     )])
///     .unwrap();
///
/// assert_eq!(data.series.len(), 3);
/// assert_eq!(data.report.diagnostics.gaps, 1);
/// assert_eq!(data.missing().len(), 1);
/// assert_eq!(
///     data.series.observable(Observable::WindSpeed).unwrap(),
///     &[Some(5.0), None, Some(6.0)]
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReader {
    sensor: Sensor,
    config: Config,
}

impl SensorReader {
    /// Builds a new [SensorReader], verifying [Config] for this [Sensor]
    pub fn new(sensor: Sensor, config: Config) -> Result<Self, Error> {
        config.validate(sensor)?;
        Ok(Self { sensor, config })
    }

    pub fn sensor(&self) -> Sensor {
        self.sensor
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Columns produced by the parser, prior derivation
    pub fn columns(&self) -> Vec<ColumnKey> {
        self.sensor
            .schema()
            .observables()
            .map(|observable| ColumnKey::new(self.sensor, observable))
            .collect()
    }

    /// Reads all files matching `wildcard` within `directory`.
    /// Files are read in lexical order.
    pub fn read_dir<P: AsRef<Path>>(&self, directory: P, wildcard: &str) -> Result<SensorData, Error> {
        let files = list_files(directory, wildcard)?;
        let mut sources = Vec::with_capacity(files.len());
        for path in files {
            // sensors may leave garbage bytes in the last line
            let bytes = std::fs::read(&path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            let content = String::from_utf8_lossy(&bytes).into_owned();
            sources.push((path, content));
        }
        self.ingest(sources)
    }

    /// Runs the pipeline on `(path, content)` pairs, in given order
    pub fn ingest<I: IntoIterator<Item = (PathBuf, String)>>(
        &self,
        sources: I,
    ) -> Result<SensorData, Error> {
        let schema = self.sensor.schema();
        let width = schema.width();

        let mut report = IngestReport::default();
        let mut epochs = Vec::<Epoch>::new();
        let mut fields = vec![Vec::<Option<f64>>::new(); width];

        for (path, content) in sources {
            #[cfg(feature = "log")]
            debug!("{}: reading {}", self.sensor, path.display());

            for (index, line) in content.lines().enumerate() {
                let parsed = RawRecord::parse(line, schema)
                    .and_then(|record| Ok((record.epoch()?, record.values()?)));
                match parsed {
                    Ok((epoch, values)) => {
                        epochs.push(epoch);
                        for (field, value) in fields.iter_mut().zip(values.into_iter()) {
                            field.push(value);
                        }
                    },
                    Err(error) => {
                        let malformed = MalformedLine::new(&path, index + 1, error);
                        #[cfg(feature = "log")]
                        debug!("{}: skipping {}", self.sensor, malformed);
                        report.malformed.push(malformed);
                    },
                }
            }
            report.files.push(path);
        }

        report.problem_files = report
            .malformed
            .iter()
            .map(|malformed| malformed.path.clone())
            .unique()
            .collect();

        #[cfg(feature = "log")]
        {
            info!("{}: {} file(s) read", self.sensor, report.files.len());
            if report.skipped() > 0 {
                warn!(
                    "{}: {} line(s) skipped in {} file(s)",
                    self.sensor,
                    report.skipped(),
                    report.problem_files.len()
                );
            }
        }

        let lengths = std::iter::once(epochs.len())
            .chain(fields.iter().map(|field| field.len()))
            .collect::<Vec<_>>();
        if !lengths.iter().all_equal() {
            return Err(Error::SchemaMismatch {
                sensor: self.sensor,
                lengths,
            });
        }

        if epochs.is_empty() {
            return Err(Error::NoData {
                sensor: self.sensor,
                files: report.files.len(),
                skipped: report.skipped(),
            });
        }

        let rows = epochs
            .into_iter()
            .enumerate()
            .map(|(i, epoch)| SensorRow {
                epoch,
                values: fields.iter().map(|field| field[i]).collect(),
            })
            .collect();

        let (mut series, diagnostics) = normalize(self.columns(), rows)?;
        self.config.conversions.apply(self.sensor, &mut series)?;
        report.diagnostics = diagnostics;

        Ok(SensorData {
            sensor: self.sensor,
            series,
            report,
        })
    }

    /// Column of interest of `data`, smoothed as described by [Config]
    pub fn smoothed(&self, data: &SensorData) -> Option<Vec<(Epoch, Option<f64>)>> {
        let observable = self.config.column_of_interest(self.sensor)?;
        let key = ColumnKey::new(self.sensor, observable);
        data.series.smoothed(&key, &Averager::from_config(&self.config))
    }
}
