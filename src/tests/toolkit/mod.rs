use std::path::PathBuf;
use std::str::FromStr;

use rand::{seq::SliceRandom, thread_rng};

use crate::{
    epoch::minute,
    prelude::{ColumnKey, Epoch, Observable, Sensor, SensorRow, Series},
};

mod timeframe;
pub use timeframe::TestTimeFrame;

#[macro_export]
macro_rules! evenly_spaced_time_frame {
    ($start: expr, $end: expr) => {
        $crate::tests::toolkit::TestTimeFrame::from_inclusive($start, $end)
    };
}

/// Path to a test resource
pub fn test_resource(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_resources")
        .join(relative)
}

/// Parses an [Epoch] described in UTC, like "2020-01-15T00:00:00"
pub fn utc(content: &str) -> Epoch {
    Epoch::from_str(&format!("{} UTC", content.trim())).unwrap()
}

/// Wind speed column, used by most scenarios
pub fn wind_speed() -> ColumnKey {
    ColumnKey::new(Sensor::Anemometer, Observable::WindSpeed)
}

/// Single value row, `offset` minutes after 2020-01-15 00:00 UTC
pub fn row(offset: i64, value: Option<f64>) -> SensorRow {
    SensorRow {
        epoch: utc("2020-01-15T00:00:00") + minute() * offset,
        values: vec![value],
    }
}

/// Shuffles rows, in place
pub fn shuffle(rows: &mut [SensorRow]) {
    rows.shuffle(&mut thread_rng());
}

/// Verifies the one minute grid, against expected epochs
pub fn generic_series_test(series: &Series, expected: TestTimeFrame) {
    assert!(series.is_steady(), "series is not steady");
    let expected = expected.collect::<Vec<_>>();
    assert_eq!(series.epochs(), &expected[..]);
    for (i, epoch) in expected.iter().enumerate() {
        assert_eq!(series.position(*epoch), Some(i), "position of {}", epoch);
    }
    for column in series.columns() {
        let values = series.column(column).unwrap();
        assert_eq!(values.len(), series.len(), "{} length", column);
    }
}
