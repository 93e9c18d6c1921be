//! Wall-clock helpers that work in the browser and natively.

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

/// Milliseconds since the unix epoch.
pub fn now_millis() -> i64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as i64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Current time as an RFC 3339 string, as the backend expects for `createdAt`.
pub fn now_iso() -> String {
    iso_from_millis(now_millis())
}

pub fn iso_from_millis(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .unwrap_or_default()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

pub fn current_year() -> i32 {
    DateTime::<Utc>::from_timestamp_millis(now_millis())
        .unwrap_or_default()
        .year()
}

/// Parse a backend timestamp. Accepts RFC 3339 and the zone-less
/// `YYYY-MM-DDTHH:MM:SS[.fff]` form, which is read as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Timestamp in milliseconds for sorting; unparseable values sort first.
pub fn timestamp_millis(s: &str) -> i64 {
    parse_timestamp(s).map_or(i64::MIN, |dt| dt.timestamp_millis())
}

/// `Jan 5, 2024` style date, or the raw input when it does not parse.
pub fn format_long_date(s: &str) -> String {
    match parse_timestamp(s) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_variants() {
        let a = parse_timestamp("2024-03-01T10:00:00Z").unwrap();
        let b = parse_timestamp("2024-03-01T10:00:00").unwrap();
        let c = parse_timestamp("2024-03-01T10:00:00.1234567").unwrap();
        assert_eq!(a, b);
        assert!(c > a);
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_timestamp_millis_orders_garbage_first() {
        assert!(timestamp_millis("nope") < timestamp_millis("1970-01-01T00:00:00Z"));
    }

    #[test]
    fn test_format_long_date() {
        assert_eq!(format_long_date("2024-01-05T08:30:00Z"), "Jan 5, 2024");
        assert_eq!(format_long_date("n/a"), "n/a");
    }

    #[test]
    fn test_iso_roundtrip() {
        let iso = iso_from_millis(1_700_000_000_123);
        assert_eq!(iso, "2023-11-14T22:13:20.123Z");
        assert_eq!(timestamp_millis(&iso), 1_700_000_000_123);
    }
}
