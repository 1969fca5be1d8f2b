//! Dotted-path extraction from JSON items

use crate::types::JsonValue;

/// Extract a possibly-absent nested value by dotted path.
///
/// `"author.username"` walks objects; a numeric segment indexes into an
/// array (`"assignees.0.id"`). A leading `$.` is accepted. Any missing
/// segment, or a `null` along the way, yields `None`.
pub fn get_path<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        current = match current {
            JsonValue::Object(map) => map.get(part)?,
            JsonValue::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    if current.is_null() {
        None
    } else {
        Some(current)
    }
}
