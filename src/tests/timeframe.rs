use crate::{
    prelude::*,
    tests::toolkit::{row, test_resource, utc, wind_speed},
    timeframe::{Bound, Error as TimeFrameError},
};

fn anemometer() -> SensorData {
    SensorReader::new(Sensor::Anemometer, Config::default())
        .unwrap()
        .read_dir(test_resource("anemometer"), "*.log")
        .unwrap()
}

#[test]
fn whole_selection() {
    let data = anemometer();
    let selection = TimeFrame::default()
        .select(&data.series, Period::Default)
        .unwrap();
    assert_eq!(selection.range, 0..=9);
    assert_eq!(selection.start, utc("2020-01-15T23:55:00"));
    assert_eq!(selection.end, utc("2020-01-16T00:04:00"));
    assert_eq!(selection.uptime, data.report.diagnostics.uptime);
    assert_eq!(selection.missing, data.missing());
}

#[test]
fn sub_range_across_midnight() {
    let data = anemometer();
    let frame = TimeFrame::new("2020-01-15 23:57", "2020-01-16 00:01").unwrap();
    let selection = frame.select(&data.series, Period::Default).unwrap();
    assert_eq!(selection.range, 2..=6);
    assert_eq!(selection.uptime, Uptime::new(1, 5));
    assert_eq!(selection.uptime.percentage(), 80.0);
    assert_eq!(selection.missing, vec![utc("2020-01-15T23:58:00")]);

    let frame = TimeFrame::new("2020-01-16 00:00", "").unwrap();
    let selection = frame.select(&data.series, Period::Default).unwrap();
    assert_eq!(selection.range, 5..=9);
    assert_eq!(selection.uptime.percentage(), 100.0);
    assert!(selection.missing.is_empty());
}

#[test]
fn out_of_span() {
    let data = anemometer();
    let frame = TimeFrame::new("2020-01-15 23:00", "").unwrap();
    match frame.select(&data.series, Period::Default) {
        Err(TimeFrameError::OutOfSpan {
            bound,
            epoch,
            first,
            last,
        }) => {
            assert_eq!(bound, Bound::Start);
            assert_eq!(epoch, "2020-01-15 23:00");
            assert_eq!(first, "2020-01-15 23:55");
            assert_eq!(last, "2020-01-16 00:04");
        },
        other => panic!("unexpected {:?}", other),
    }

    let frame = TimeFrame::new("", "2020-01-16 00:05").unwrap();
    assert!(matches!(
        frame.select(&data.series, Period::Default),
        Err(TimeFrameError::OutOfSpan {
            bound: Bound::End,
            ..
        })
    ));
}

#[test]
fn inverted_bounds() {
    let data = anemometer();
    let frame = TimeFrame::new("2020-01-16 00:02", "2020-01-16 00:02").unwrap();
    assert!(matches!(
        frame.select(&data.series, Period::Default),
        Err(TimeFrameError::StartNotBeforeEnd { .. })
    ));
}

#[test]
fn periods_require_a_minimal_span() {
    let data = anemometer();
    for period in [Period::Daily, Period::Weekly, Period::Monthly] {
        assert!(
            matches!(
                TimeFrame::default().select(&data.series, period),
                Err(TimeFrameError::TooShort { .. })
            ),
            "{}",
            period
        );
    }
}

#[test]
fn monthly_period() {
    // 2020-01-15 00:00 to 2020-02-16 00:00, one report per hour
    let rows = (0..=32 * 24)
        .map(|hour| row(hour * 60, Some(1.0)))
        .collect::<Vec<_>>();
    let (series, _) = normalize(vec![wind_speed()], rows).unwrap();

    let selection = TimeFrame::default()
        .select(&series, Period::Monthly)
        .unwrap();
    assert_eq!(selection.period, Period::Monthly);

    // 15 days only
    let frame = TimeFrame::new("2020-02-01 00:00", "2020-02-16 00:00").unwrap();
    assert!(matches!(
        frame.select(&series, Period::Monthly),
        Err(TimeFrameError::TooShort { .. })
    ));

    let frame = TimeFrame::new("2020-01-15 00:00", "2020-02-12 00:00").unwrap();
    let selection = frame.select(&series, Period::Monthly).unwrap();
    assert_eq!(selection.period, Period::Monthly);

    let frame = TimeFrame::new("2020-01-15 00:00", "2020-01-31 23:00").unwrap();
    let selection = frame.select(&series, Period::Daily).unwrap();
    assert_eq!(selection.period, Period::Daily);
}

#[test]
fn monthly_fallback() {
    // 2020-02-01 00:00 to 2020-02-29 23:00, hourly: 28 days and more,
    // but the first of the month is the first report
    let start = utc("2020-02-01T00:00:00");
    let rows = (0..29 * 24_i64)
        .map(|hour| SensorRow {
            epoch: start + Duration::from_seconds(3600.0) * hour,
            values: vec![Some(1.0)],
        })
        .collect::<Vec<_>>();
    let (series, _) = normalize(vec![wind_speed()], rows).unwrap();
    let selection = TimeFrame::default()
        .select(&series, Period::Monthly)
        .unwrap();
    assert_eq!(selection.period, Period::Default);
}

#[test]
fn bounds_within_a_filled_gap() {
    let rows = vec![row(0, Some(1.0)), row(10, Some(2.0))];
    let (series, _) = normalize(vec![wind_speed()], rows).unwrap();

    let frame = TimeFrame::new("2020-01-15 00:03", "2020-01-15 00:07").unwrap();
    let selection = frame.select(&series, Period::Default).unwrap();
    assert_eq!(selection.range, 3..=7);
    assert_eq!(selection.start, utc("2020-01-15T00:03:00"));
    assert_eq!(selection.end, utc("2020-01-15T00:07:00"));
    assert_eq!(selection.uptime, Uptime::new(5, 5));
    assert_eq!(selection.uptime.percentage(), 0.0);
    assert_eq!(
        selection.missing,
        (3..=7)
            .map(|offset| row(offset, None).epoch)
            .collect::<Vec<_>>()
    );

    // ends on a real report
    let frame = TimeFrame::new("2020-01-15 00:05", "2020-01-15 00:10").unwrap();
    let selection = frame.select(&series, Period::Default).unwrap();
    assert_eq!(selection.range, 5..=10);
    assert_eq!(selection.uptime, Uptime::new(5, 6));
}
