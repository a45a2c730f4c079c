//! Conversions from raw attribute strings to typed fields.
//!
//! Malformed input is always a [`ResponseError::InvalidValue`]; nothing here
//! falls back to a default.

use crate::error::ResponseError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::collections::BTreeSet;

/// Format of note timestamps (`2020-09-06 14:06:11`).
const NOTE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a non-negative count.
pub fn parse_count(field: &str, value: &str) -> Result<u32, ResponseError> {
    let trimmed = value.trim();
    // `u32::from_str` accepts a leading '+'
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(field, value, "a non-negative integer"));
    }
    trimmed
        .parse()
        .map_err(|_| invalid(field, value, "a non-negative integer"))
}

/// Parse a `yes`/`no` flag.
pub fn parse_flag(field: &str, value: &str) -> Result<bool, ResponseError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "1" | "true" => Ok(true),
        "no" | "0" | "false" => Ok(false),
        _ => Err(invalid(field, value, "yes or no")),
    }
}

/// Render a flag the way the service expects it.
pub fn format_flag(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Parse an RFC 3339 timestamp such as `2020-09-02T03:59:55Z`.
pub fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, ResponseError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| invalid(field, value, "an RFC 3339 timestamp"))
}

/// Render a timestamp the way the service expects it.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ResponseError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| invalid(field, value, "a YYYY-MM-DD date"))
}

/// Parse a note timestamp, which carries no zone and is taken as UTC.
pub fn parse_note_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, ResponseError> {
    NaiveDateTime::parse_from_str(value.trim(), NOTE_TIMESTAMP_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| invalid(field, value, "a YYYY-MM-DD HH:MM:SS timestamp"))
}

/// Split a space-separated tag attribute into a set.
pub fn split_tags(value: &str) -> BTreeSet<String> {
    value.split_whitespace().map(str::to_string).collect()
}

fn invalid(field: &str, value: &str, expected: &'static str) -> ResponseError {
    ResponseError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    }
}
