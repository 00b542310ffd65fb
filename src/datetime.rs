use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

/// ISO 8601 with microsecond precision, the format Warp 10 expects.
const ISO_MICROSECONDS: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Parses a date string when the day, the month and the year are all present.
///
/// Accepts RFC 3339 (offsets are converted to UTC), `YYYY-MM-DDTHH:MM:SS`
/// with an optional fraction (assumed UTC), and plain `YYYY-MM-DD` dates.
/// Anything more free-form, like a bare year, is not a date.
pub fn parse_date(input: &str) -> Option<NaiveDateTime> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(input) {
        return Some(date_time.with_timezone(&Utc).naive_utc());
    }
    if let Ok(date_time) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(date_time);
    }
    if let Ok(date_time) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(date_time);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}

/// Formats a date the way it goes into a script.
pub fn format_date(date_time: NaiveDateTime) -> String {
    date_time.format(ISO_MICROSECONDS).to_string()
}

pub fn datetime_to_microseconds(date_time: &DateTime<Utc>) -> i64 {
    date_time.timestamp_micros()
}

pub fn duration_to_microseconds(duration: &Duration) -> Option<i64> {
    duration.num_microseconds()
}

pub fn microseconds_to_datetime(microseconds: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_micros(microseconds).map(|date_time| date_time.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        let parsed = parse_date("2020-01-01").unwrap();
        assert_eq!(format_date(parsed), "2020-01-01T00:00:00.000000Z");
    }

    #[test]
    fn test_parse_rfc3339() {
        let parsed = parse_date("2020-01-01T12:30:00.000000Z").unwrap();
        assert_eq!(format_date(parsed), "2020-01-01T12:30:00.000000Z");

        // Offsets are converted to UTC
        let parsed = parse_date("2020-01-01T02:00:00+02:00").unwrap();
        assert_eq!(format_date(parsed), "2020-01-01T00:00:00.000000Z");
    }

    #[test]
    fn test_parse_without_zone() {
        let parsed = parse_date("2020-06-15T08:00:00").unwrap();
        assert_eq!(format_date(parsed), "2020-06-15T08:00:00.000000Z");
    }

    #[test]
    fn test_incomplete_dates_are_refused() {
        assert!(parse_date("1871").is_none());
        assert!(parse_date("2020-01").is_none());
        assert!(parse_date("January").is_none());
    }

    #[test]
    fn test_microsecond_conversions() {
        let date_time = parse_date("2020-01-01").unwrap().and_utc();
        assert_eq!(datetime_to_microseconds(&date_time), 1_577_836_800_000_000);
        assert_eq!(
            microseconds_to_datetime(1_577_836_800_000_000).unwrap(),
            date_time.naive_utc()
        );
    }
}
