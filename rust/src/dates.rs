//! Parsing of concrete due dates.
//!
//! Due dates arrive as ISO-8601 strings from the host. A date-only value
//! means midnight of that day; values with an offset are normalised to UTC.
//! All comparisons in the crate use naive UTC date-times.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse a due-date string, returning `None` if no supported format matches.
pub fn parse_due_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Midnight at the start of the day containing `now`.
pub fn start_of_day(now: NaiveDateTime) -> NaiveDateTime {
    now.date().and_time(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        assert_eq!(
            parse_due_date("2025-03-14"),
            Some(make_datetime(2025, 3, 14, 0, 0))
        );
    }

    #[test]
    fn test_parse_rfc3339_normalises_to_utc() {
        assert_eq!(
            parse_due_date("2025-03-14T09:30:00+02:00"),
            Some(make_datetime(2025, 3, 14, 7, 30))
        );
        assert_eq!(
            parse_due_date("2025-03-14T09:30:00.000Z"),
            Some(make_datetime(2025, 3, 14, 9, 30))
        );
    }

    #[test]
    fn test_parse_naive_datetime() {
        assert_eq!(
            parse_due_date("2025-03-14T09:30:00"),
            Some(make_datetime(2025, 3, 14, 9, 30))
        );
        assert_eq!(
            parse_due_date("2025-03-14T09:30"),
            Some(make_datetime(2025, 3, 14, 9, 30))
        );
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert_eq!(parse_due_date(""), None);
        assert_eq!(parse_due_date("next tuesday"), None);
        assert_eq!(parse_due_date("2025-13-40"), None);
    }

    #[test]
    fn test_start_of_day() {
        assert_eq!(
            start_of_day(make_datetime(2025, 3, 14, 17, 45)),
            make_datetime(2025, 3, 14, 0, 0)
        );
    }
}
