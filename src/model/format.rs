// Date formatting for cards and the detail view.
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

// "Mon, Jan 1, 8:00 PM"
const SHORT_FORMAT: &str = "%a, %b %-d, %-I:%M %p";
// "Monday, January 1, 8:00 PM"
const LONG_FORMAT: &str = "%A, %B %-d, %-I:%M %p";

/// Parses the backend's `start_time`.
///
/// Accepts RFC 3339 (`2024-01-01T20:00:00Z`, `...+00:00`), a naive date-time
/// which is read as wall-clock time in `tz`, and a bare date (midnight UTC).
pub fn parse_start_time<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(tz));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(tz))
}

pub fn short_date_in<Tz>(value: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_in(value, tz, SHORT_FORMAT)
}

pub fn long_date_in<Tz>(value: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_in(value, tz, LONG_FORMAT)
}

/// Short form in the user's local time zone. Empty when missing or unparseable.
pub fn short_date(value: Option<&str>) -> String {
    short_date_in(value, &Local)
}

pub fn long_date(value: Option<&str>) -> String {
    long_date_in(value, &Local)
}

fn format_in<Tz>(value: Option<&str>, tz: &Tz, fmt: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    value
        .and_then(|v| parse_start_time(v, tz))
        .map(|dt| dt.format(fmt).to_string())
        .unwrap_or_default()
}
