//! Period parsing: every stored period becomes a timezone-naive date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::data::DataError;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a period cell.
///
/// Accepts `YYYY-MM-DD`, naive date-times, and offset-carrying timestamps
/// (RFC 3339 or `YYYY-MM-DD HH:MM:SS+HH:MM`). Offsets are dropped and the
/// local wall-clock date is kept.
pub fn parse_period(raw: &str) -> Result<NaiveDate, DataError> {
    let s = raw.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local().date());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(dt.naive_local().date());
    }

    Err(DataError::BadPeriod(raw.to_string()))
}

/// Render a period as a timezone-naive `YYYY-MM-DD` string.
pub fn format_period(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn plain_date() {
        assert_eq!(parse_period("2020-01-01").unwrap(), d(2020, 1, 1));
    }

    #[test]
    fn naive_datetime_drops_time() {
        assert_eq!(parse_period("2020-02-01 00:00:00").unwrap(), d(2020, 2, 1));
        assert_eq!(parse_period("2020-02-01 00:00:00.000").unwrap(), d(2020, 2, 1));
    }

    #[test]
    fn offset_is_dropped_keeping_wall_clock_date() {
        assert_eq!(parse_period("2020-03-01T00:00:00+05:00").unwrap(), d(2020, 3, 1));
        assert_eq!(parse_period("2020-03-01 23:30:00-02:00").unwrap(), d(2020, 3, 1));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(parse_period("March"), Err(DataError::BadPeriod(_))));
    }

    #[test]
    fn formats_without_time_or_zone() {
        assert_eq!(format_period(d(2023, 11, 1)), "2023-11-01");
    }
}
