//! Common utility functions

use chrono::{DateTime, NaiveDateTime, Utc};

/// Timestamp format written by SQLite `CURRENT_TIMESTAMP` (always UTC)
pub const DB_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Convert DateTime to database string format
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(DB_DATE_FORMAT).to_string()
}

/// Parse database timestamp string
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, DB_DATE_FORMAT)
        .ok()
        .map(|ndt| DateTime::from_naive_utc_and_offset(ndt, Utc))
}
