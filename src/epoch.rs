//! Timestamp builder.
//!
//! Sensor logs describe time with five or six separate tokens
//! (year, month, day, hour, minute and optional seconds),
//! always expressed in UTC.
use crate::prelude::{Duration, Epoch, ParsingError};
use regex::Regex;

lazy_static! {
    /// Time frame boundaries, as provided by the user
    static ref BOUND_FORMAT: Regex =
        Regex::new(r"^(\d{4})-(\d{2})-(\d{2}) (\d{2}):(\d{2})$").unwrap();
}

/// One minute, the nominal reporting interval of all sensors
pub fn minute() -> Duration {
    Duration::from_seconds(60.0)
}

/// Number of whole minutes from `start` to `end` (negative if `end` < `start`).
pub(crate) fn minutes_between(start: Epoch, end: Epoch) -> i64 {
    ((end - start).to_seconds() / 60.0).round() as i64
}

/*
 * Seconds are either integer or decimal numbers, in [0, 60[.
 * A decimal point must be followed by at least one digit.
 * Decimal part is kept with nanosecond resolution.
 */
fn parse_seconds(content: &str) -> Result<(u8, u32), ParsingError> {
    let err = || ParsingError::SecondsField(content.to_string());
    let (whole, nanos) = match content.find('.') {
        Some(dot) => {
            let (whole, frac) = (&content[..dot], &content[dot + 1..]);
            if frac.is_empty() || !frac.chars().all(|c| c.is_ascii_digit()) {
                return Err(err());
            }
            let mut digits = frac.chars().take(9).collect::<String>();
            while digits.len() < 9 {
                digits.push('0');
            }
            let nanos = digits.parse::<u32>().map_err(|_| err())?;
            let whole = if whole.is_empty() { "0" } else { whole };
            (whole, nanos)
        },
        None => (content, 0),
    };
    let secs = whole.parse::<u8>().map_err(|_| err())?;
    if secs > 59 {
        return Err(err());
    }
    Ok((secs, nanos))
}

/// Builds an [Epoch] from individual date and time fields.
/// When `second` is provided, the result is rounded to the nearest
/// minute with [round_half_up].
/// ```
/// use paws::epoch::parse_utc;
/// use paws::prelude::Epoch;
/// use std::str::FromStr;
/// let t = parse_utc("2020", "01", "15", "12", "00", Some("30")).unwrap();
/// assert_eq!(t, Epoch::from_str("2020-01-15T12:01:00 UTC").unwrap());
/// ```
pub fn parse_utc(
    year: &str,
    month: &str,
    day: &str,
    hour: &str,
    minute: &str,
    second: Option<&str>,
) -> Result<Epoch, ParsingError> {
    let y = year
        .parse::<i32>()
        .map_err(|_| ParsingError::YearField(year.to_string()))?;
    let m = month
        .parse::<u8>()
        .map_err(|_| ParsingError::MonthField(month.to_string()))?;
    let d = day
        .parse::<u8>()
        .map_err(|_| ParsingError::DayField(day.to_string()))?;
    let hh = hour
        .parse::<u8>()
        .map_err(|_| ParsingError::HoursField(hour.to_string()))?;
    let mm = minute
        .parse::<u8>()
        .map_err(|_| ParsingError::MinutesField(minute.to_string()))?;

    let (ss, ns) = match second {
        Some(second) => parse_seconds(second)?,
        None => (0, 0),
    };

    if hh > 23 || mm > 59 {
        return Err(ParsingError::InvalidDate(format!(
            "{}-{}-{} {}:{}",
            year, month, day, hour, minute
        )));
    }

    let epoch = Epoch::maybe_from_gregorian_utc(y, m, d, hh, mm, ss, ns).map_err(|_| {
        ParsingError::InvalidDate(format!("{}-{}-{} {}:{}", year, month, day, hour, minute))
    })?;

    if second.is_some() {
        Ok(round_half_up(epoch))
    } else {
        Ok(epoch)
    }
}

/// Rounds given [Epoch] to the nearest minute.
/// Sub-minute offsets strictly below 30s round down, anything
/// else rounds up: exact half minutes always round up.
/// ```
/// use paws::epoch::round_half_up;
/// use paws::prelude::Epoch;
/// use std::str::FromStr;
/// let t = Epoch::from_str("2020-01-15T16:30:30 UTC").unwrap();
/// assert_eq!(round_half_up(t), Epoch::from_str("2020-01-15T16:31:00 UTC").unwrap());
/// ```
pub fn round_half_up(epoch: Epoch) -> Epoch {
    let (_, _, _, _, _, ss, ns) = epoch.to_gregorian_utc();
    let offset = ss as i128 * 1_000_000_000 + ns as i128;
    let floor = epoch - Duration::from_total_nanoseconds(offset);
    if ss < 30 {
        floor
    } else {
        floor + minute()
    }
}

/// Parses a `YYYY-MM-DD HH:mm` time frame boundary.
/// Returns None on format mismatch or invalid calendar date.
pub fn parse_bound(content: &str) -> Option<Epoch> {
    let captures = BOUND_FORMAT.captures(content)?;
    let y = captures[1].parse::<i32>().ok()?;
    let m = captures[2].parse::<u8>().ok()?;
    let d = captures[3].parse::<u8>().ok()?;
    let hh = captures[4].parse::<u8>().ok()?;
    let mm = captures[5].parse::<u8>().ok()?;
    if hh > 23 || mm > 59 {
        return None;
    }
    Epoch::maybe_from_gregorian_utc(y, m, d, hh, mm, 0, 0).ok()
}

/// Formats given [Epoch] as `YYYY-MM-DD HH:mm`
pub fn format_bound(epoch: Epoch) -> String {
    let (y, m, d, hh, mm, _, _) = epoch.to_gregorian_utc();
    format!("{:04}-{:02}-{:02} {:02}:{:02}", y, m, d, hh, mm)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn minute_resolution() {
        let t = parse_utc("2020", "01", "15", "00", "02", None).unwrap();
        assert_eq!(t, Epoch::from_str("2020-01-15T00:02:00 UTC").unwrap());

        let t = parse_utc("2020", "1", "5", "7", "9", None).unwrap();
        assert_eq!(t, Epoch::from_str("2020-01-05T07:09:00 UTC").unwrap());
    }

    #[test]
    fn half_minute_rounds_up() {
        let t = parse_utc("2020", "01", "15", "00", "00", Some("30.0")).unwrap();
        assert_eq!(t, Epoch::from_str("2020-01-15T00:01:00 UTC").unwrap());

        let t = parse_utc("2020", "01", "15", "00", "00", Some("30")).unwrap();
        assert_eq!(t, Epoch::from_str("2020-01-15T00:01:00 UTC").unwrap());

        let t = parse_utc("2020", "01", "15", "00", "00", Some("29.999")).unwrap();
        assert_eq!(t, Epoch::from_str("2020-01-15T00:00:00 UTC").unwrap());

        let t = parse_utc("2020", "01", "15", "00", "00", Some("0")).unwrap();
        assert_eq!(t, Epoch::from_str("2020-01-15T00:00:00 UTC").unwrap());
    }

    #[test]
    fn rounding_rolls_over() {
        let t = parse_utc("2020", "12", "31", "23", "59", Some("45")).unwrap();
        assert_eq!(t, Epoch::from_str("2021-01-01T00:00:00 UTC").unwrap());
    }

    #[test]
    fn banker_rounding_is_not_used() {
        // half to even would bring 10:16:30 down to 10:16
        for (minute, expected) in [("15", "16"), ("16", "17")] {
            let t = parse_utc("2020", "01", "15", "10", minute, Some("30")).unwrap();
            let expected = format!("2020-01-15T10:{}:00 UTC", expected);
            assert_eq!(t, Epoch::from_str(&expected).unwrap());
        }
    }

    #[test]
    fn invalid_fields() {
        assert_eq!(
            parse_utc("2020", "02", "30", "00", "00", None),
            Err(ParsingError::InvalidDate("2020-02-30 00:00".to_string()))
        );
        assert_eq!(
            parse_utc("2020", "13", "01", "00", "00", None),
            Err(ParsingError::InvalidDate("2020-13-01 00:00".to_string()))
        );
        assert_eq!(
            parse_utc("20@0", "01", "01", "00", "00", None),
            Err(ParsingError::YearField("20@0".to_string()))
        );
        assert_eq!(
            parse_utc("2020", "01", "01", "24", "00", None),
            Err(ParsingError::InvalidDate("2020-01-01 24:00".to_string()))
        );
        assert_eq!(
            parse_utc("2020", "01", "01", "00", "00", Some("60")),
            Err(ParsingError::SecondsField("60".to_string()))
        );
        assert_eq!(
            parse_utc("2020", "01", "01", "00", "00", Some("1.2a")),
            Err(ParsingError::SecondsField("1.2a".to_string()))
        );
        for damaged in [".", "30.", "", "-1", "+"] {
            assert_eq!(
                parse_utc("2020", "01", "01", "00", "00", Some(damaged)),
                Err(ParsingError::SecondsField(damaged.to_string())),
                "accepted \"{}\"",
                damaged
            );
        }
        let t = parse_utc("2020", "01", "01", "00", "00", Some(".5")).unwrap();
        assert_eq!(t, Epoch::from_str("2020-01-01T00:00:00 UTC").unwrap());
    }

    #[test]
    fn bounds() {
        let t = parse_bound("2020-01-15 00:01").unwrap();
        assert_eq!(t, Epoch::from_str("2020-01-15T00:01:00 UTC").unwrap());
        assert_eq!(format_bound(t), "2020-01-15 00:01");

        for invalid in [
            "",
            "2020-01-15",
            "2020-1-15 00:01",
            "2020-01-15T00:01",
            "2020-01-15 00:01:00",
            "2020-02-31 00:00",
            "2020-01-15 25:00",
        ] {
            assert!(parse_bound(invalid).is_none(), "parsed \"{}\"", invalid);
        }
    }

    #[test]
    fn minute_offsets() {
        let t0 = Epoch::from_str("2020-01-15T00:00:00 UTC").unwrap();
        let t1 = Epoch::from_str("2020-01-15T01:30:00 UTC").unwrap();
        assert_eq!(minutes_between(t0, t1), 90);
        assert_eq!(minutes_between(t1, t0), -90);
        assert_eq!(minutes_between(t0, t0 + minute()), 1);
    }
}
