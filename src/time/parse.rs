//! Timestamp Parsing
//!
//! ISO-8601 dates and date-times to epoch milliseconds. Failures yield
//! NaN rather than an error: NaN compares false against everything, so an
//! unparseable timestamp falls through the mapper's branches to its
//! documented fallback position instead of crashing the layout pass.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse an ISO-8601 date or date-time string into epoch milliseconds.
///
/// Accepts RFC 3339 date-times (`2023-06-01T12:30:00Z`, with offset),
/// bare dates (`2023-06-01`, midnight UTC), and offset-less date-times
/// (`2023-06-01T12:30:00`, treated as UTC). Anything else is NaN.
pub fn parse_timestamp_ms(value: &str) -> f64 {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.timestamp_millis() as f64;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return dt.and_utc().timestamp_millis() as f64;
        }
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return dt.and_utc().timestamp_millis() as f64;
    }

    f64::NAN
}
