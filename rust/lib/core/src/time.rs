use chrono::{DateTime, NaiveDateTime, Utc};

/// SQLite `CURRENT_TIMESTAMP` layout (always UTC, no offset).
const SQLITE_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parse a stored timestamp into UTC.
///
/// Accepts RFC 3339 (any offset, optional fractional seconds) and the
/// bare `YYYY-MM-DD HH:MM:SS[.fff]` form SQLite writes for
/// `CURRENT_TIMESTAMP`, which is read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, SQLITE_TIMESTAMP)
        .ok()
        .map(|naive| naive.and_utc())
}
