//! Column definitions and row projection

use super::path::get_path;
use super::transforms::{
    access_level_label, date_only_to_timestamp, display_names, format_timestamp,
    normalize_timestamp,
};
use crate::types::{ColumnType, JsonObject, JsonValue};
use std::collections::HashMap;

/// Where a column's raw value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Dotted path into the raw item
    Field(&'static str),
    /// Value of the named scoping key supplied by the query
    Qual(&'static str),
}

/// Named conversion applied to a raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transform {
    /// Copy the value as is
    #[default]
    None,
    /// `YYYY-MM-DD` string to a midnight-UTC timestamp
    DateOnly,
    /// Integer access level to its label
    AccessLevel,
    /// List of objects to the list of their values for this field
    Names(&'static str),
}

/// A column of a table
#[derive(Debug, Clone)]
pub struct Column {
    /// Output column name
    pub name: &'static str,
    /// Static column type
    pub column_type: ColumnType,
    /// Human-readable description
    pub description: &'static str,
    /// Where the value comes from
    pub source: Source,
    /// Conversion applied to the raw value
    pub transform: Transform,
    /// Surface empty strings and zero numbers as null
    pub null_if_zero: bool,
}

impl Column {
    /// Create a column reading the field of the same name
    pub fn new(name: &'static str, column_type: ColumnType, description: &'static str) -> Self {
        Self {
            name,
            column_type,
            description,
            source: Source::Field(name),
            transform: Transform::None,
            null_if_zero: false,
        }
    }

    /// Integer column
    pub fn int(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnType::Int, description)
    }

    /// Float column
    pub fn double(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnType::Double, description)
    }

    /// Text column
    pub fn text(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnType::Text, description)
    }

    /// Boolean column
    pub fn bool(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnType::Bool, description)
    }

    /// Timestamp column
    pub fn timestamp(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnType::Timestamp, description)
    }

    /// JSON column
    pub fn json(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ColumnType::Json, description)
    }

    /// Read from a dotted path instead of the column name
    #[must_use]
    pub fn at(mut self, path: &'static str) -> Self {
        self.source = Source::Field(path);
        self
    }

    /// Fill from the value the query supplied for a scoping key
    #[must_use]
    pub fn from_qual(mut self, key: &'static str) -> Self {
        self.source = Source::Qual(key);
        self
    }

    /// Apply a named transform
    #[must_use]
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Surface zero values as null
    #[must_use]
    pub fn null_if_zero(mut self) -> Self {
        self.null_if_zero = true;
        self
    }

    /// Compute this column's cell for `item`
    pub fn project(&self, item: &JsonValue, ctx: &ProjectionContext) -> JsonValue {
        let raw = match self.source {
            Source::Field(path) => get_path(item, path).cloned(),
            Source::Qual(key) => ctx.qual(key).cloned(),
        };

        let Some(raw) = raw else {
            return JsonValue::Null;
        };

        if self.null_if_zero && is_zero(&raw) {
            return JsonValue::Null;
        }

        let transformed = match self.transform {
            Transform::None => raw,
            Transform::DateOnly => raw
                .as_str()
                .and_then(date_only_to_timestamp)
                .map_or(JsonValue::Null, |ts| JsonValue::String(format_timestamp(&ts))),
            Transform::AccessLevel => {
                let code = raw
                    .as_i64()
                    .or_else(|| raw.as_str().and_then(|s| s.parse().ok()))
                    .unwrap_or(0);
                JsonValue::String(access_level_label(code).to_string())
            }
            Transform::Names(field) => display_names(&raw, field),
        };

        coerce(transformed, self.column_type)
    }
}

/// Whether a raw value is the zero value of its type
fn is_zero(value: &JsonValue) -> bool {
    match value {
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Fit a value into a column type, or null when it does not fit
fn coerce(value: JsonValue, column_type: ColumnType) -> JsonValue {
    match (column_type, value) {
        (_, JsonValue::Null) => JsonValue::Null,
        (ColumnType::Json, v) => v,
        (ColumnType::Int, JsonValue::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map_or(JsonValue::Null, JsonValue::from),
        (ColumnType::Int, JsonValue::String(s)) => {
            s.trim().parse::<i64>().map_or(JsonValue::Null, JsonValue::from)
        }
        (ColumnType::Double, JsonValue::Number(n)) => {
            n.as_f64().map_or(JsonValue::Null, JsonValue::from)
        }
        (ColumnType::Double, JsonValue::String(s)) => {
            s.trim().parse::<f64>().map_or(JsonValue::Null, JsonValue::from)
        }
        (ColumnType::Bool, JsonValue::Bool(b)) => JsonValue::Bool(b),
        (ColumnType::Text, JsonValue::String(s)) => JsonValue::String(s),
        (ColumnType::Text, JsonValue::Number(n)) => JsonValue::String(n.to_string()),
        (ColumnType::Text, JsonValue::Bool(b)) => JsonValue::String(b.to_string()),
        (ColumnType::Text, v) => JsonValue::String(v.to_string()),
        (ColumnType::Timestamp, JsonValue::String(s)) => {
            normalize_timestamp(&s).map_or(JsonValue::Null, JsonValue::String)
        }
        _ => JsonValue::Null,
    }
}

/// Values available to `Source::Qual` columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionContext {
    quals: HashMap<String, JsonValue>,
}

impl ProjectionContext {
    /// An empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scoping-key value
    #[must_use]
    pub fn with_qual(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.quals.insert(key.into(), value.into());
        self
    }

    /// Set a scoping-key value
    pub fn set_qual(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.quals.insert(key.into(), value.into());
    }

    /// Look up a scoping-key value
    pub fn qual(&self, key: &str) -> Option<&JsonValue> {
        self.quals.get(key)
    }
}

/// One projected row, cells aligned with the table's columns
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<JsonValue>,
}

impl Row {
    /// Create a row from cell values
    pub fn new(values: Vec<JsonValue>) -> Self {
        Self { values }
    }

    /// Cell values in column order
    pub fn values(&self) -> &[JsonValue] {
        &self.values
    }

    /// Cell at `index`
    pub fn get(&self, index: usize) -> Option<&JsonValue> {
        self.values.get(index)
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Take the cell values
    pub fn into_values(self) -> Vec<JsonValue> {
        self.values
    }

    /// Pair the cells with their column names
    pub fn to_object(&self, columns: &[Column]) -> JsonObject {
        columns
            .iter()
            .zip(&self.values)
            .map(|(column, value)| (column.name.to_string(), value.clone()))
            .collect()
    }
}

/// Project a raw item onto `columns`
pub fn project(item: &JsonValue, columns: &[Column], ctx: &ProjectionContext) -> Row {
    Row::new(columns.iter().map(|c| c.project(item, ctx)).collect())
}
