//! Named value transforms

use crate::types::JsonValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// GitLab access levels and their labels
const ACCESS_LEVELS: &[(i64, &str)] = &[
    (0, "No Permissions"),
    (5, "Minimal Access"),
    (10, "Guest"),
    (20, "Reporter"),
    (30, "Developer"),
    (40, "Maintainer"),
    (50, "Owner"),
];

/// Label for an integer access-level code; unknown codes have no permissions
pub fn access_level_label(code: i64) -> &'static str {
    ACCESS_LEVELS
        .iter()
        .find(|(level, _)| *level == code)
        .map_or("No Permissions", |(_, label)| label)
}

/// Parse a `YYYY-MM-DD` date into midnight UTC
pub fn date_only_to_timestamp(date: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Parse a timestamp string in any of the shapes GitLab returns
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(ts.and_utc());
    }
    if let Ok(ts) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S %z") {
        return Some(ts.with_timezone(&Utc));
    }
    date_only_to_timestamp(value)
}

/// Render a timestamp the way every timestamp cell is rendered
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Normalize a timestamp string to RFC 3339 UTC
pub fn normalize_timestamp(value: &str) -> Option<String> {
    parse_timestamp(value).map(|ts| format_timestamp(&ts))
}

/// Flatten a list of objects into the list of their `field` values.
///
/// Input order is preserved, objects without the field are skipped, and a
/// null (or non-list) input stays null.
pub fn display_names(value: &JsonValue, field: &str) -> JsonValue {
    match value {
        JsonValue::Array(items) => JsonValue::Array(
            items
                .iter()
                .filter_map(|item| item.get(field))
                .filter(|v| !v.is_null())
                .cloned()
                .collect(),
        ),
        _ => JsonValue::Null,
    }
}
