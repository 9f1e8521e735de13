//! Timestamp codec for the persisted store.
//!
//! Timestamps are written as `YYYY-MM-DD HH:MM:SS` local time. Older files
//! may carry date-only values, which load at midnight.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serializer;

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format(ts: NaiveDateTime) -> String {
    ts.format(DATETIME_FORMAT).to_string()
}

/// Parse a stored timestamp, accepting the date-only fallback.
pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse an optional stored timestamp. Unparsable values become `None` with
/// a warning naming the owning record.
pub fn parse_lenient(raw: Option<&str>, owner: &str) -> Option<NaiveDateTime> {
    let raw = raw?;
    let parsed = parse(raw);
    if parsed.is_none() {
        tracing::warn!(record = owner, value = raw, "could not parse timestamp, treating as absent");
    }
    parsed
}

pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(*value))
}

pub fn serialize_opt<S: Serializer>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(ts) => serializer.serialize_str(&format(*ts)),
        None => serializer.serialize_none(),
    }
}
