//! Arrow schemas for tables and row to Arrow conversion
//!
//! Tables have static schemas, so nothing is inferred from the data:
//! every column maps to one Arrow type and every field is nullable.

use crate::error::{Error, Result};
use crate::projection::{format_timestamp, parse_timestamp, Column, Row};
use crate::types::{ColumnType, JsonValue};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray,
    TimestampMicrosecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Timezone attached to timestamp columns
const UTC: &str = "UTC";

/// Arrow type of a column type
pub fn arrow_type(column_type: ColumnType) -> DataType {
    match column_type {
        ColumnType::Int => DataType::Int64,
        ColumnType::Double => DataType::Float64,
        ColumnType::Bool => DataType::Boolean,
        ColumnType::Timestamp => DataType::Timestamp(TimeUnit::Microsecond, Some(UTC.into())),
        ColumnType::Text | ColumnType::Json => DataType::Utf8,
    }
}

/// Arrow schema of a table
pub fn table_schema(columns: &[Column]) -> Schema {
    let fields: Vec<Field> = columns
        .iter()
        .map(|c| Field::new(c.name, arrow_type(c.column_type), true))
        .collect();
    Schema::new(fields)
}

/// Convert projected rows to an Arrow RecordBatch
///
/// Cells that do not fit their column type become nulls.
pub fn rows_to_batch(columns: &[Column], rows: &[Row]) -> Result<RecordBatch> {
    let schema = Arc::new(table_schema(columns));

    if rows.is_empty() {
        return Ok(RecordBatch::new_empty(schema));
    }

    let arrays: Vec<ArrayRef> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let cells: Vec<Option<&JsonValue>> = rows
                .iter()
                .map(|row| row.get(index).filter(|v| !v.is_null()))
                .collect();
            build_array(&cells, column.column_type)
        })
        .collect();

    RecordBatch::try_new(schema, arrays).map_err(|e| Error::Output {
        message: format!("Failed to create RecordBatch: {e}"),
    })
}

/// Build an Arrow array from cells of one column
fn build_array(cells: &[Option<&JsonValue>], column_type: ColumnType) -> ArrayRef {
    match column_type {
        ColumnType::Int => {
            let arr: Int64Array = cells.iter().map(|v| v.and_then(JsonValue::as_i64)).collect();
            Arc::new(arr)
        }

        ColumnType::Double => {
            let arr: Float64Array = cells.iter().map(|v| v.and_then(JsonValue::as_f64)).collect();
            Arc::new(arr)
        }

        ColumnType::Bool => {
            let arr: BooleanArray = cells.iter().map(|v| v.and_then(JsonValue::as_bool)).collect();
            Arc::new(arr)
        }

        ColumnType::Timestamp => {
            let micros: Vec<Option<i64>> = cells
                .iter()
                .map(|v| {
                    v.and_then(JsonValue::as_str)
                        .and_then(parse_timestamp)
                        .map(|ts| ts.timestamp_micros())
                })
                .collect();
            Arc::new(TimestampMicrosecondArray::from(micros).with_timezone(UTC))
        }

        ColumnType::Text => {
            let arr: StringArray = cells
                .iter()
                .map(|v| {
                    v.map(|v| match v {
                        JsonValue::String(s) => s.clone(),
                        _ => v.to_string(),
                    })
                })
                .collect();
            Arc::new(arr)
        }

        // Nested values are serialized as JSON text
        ColumnType::Json => {
            let arr: StringArray = cells.iter().map(|v| v.map(ToString::to_string)).collect();
            Arc::new(arr)
        }
    }
}

/// Convert an Arrow RecordBatch back to JSON objects
///
/// Timestamps come back as RFC 3339 strings; JSON columns stay text.
pub fn batch_to_json(batch: &RecordBatch) -> Result<Vec<JsonValue>> {
    let schema = batch.schema();
    let mut records = Vec::with_capacity(batch.num_rows());

    for row in 0..batch.num_rows() {
        let mut record = serde_json::Map::new();
        for (index, field) in schema.fields().iter().enumerate() {
            let value = array_value_to_json(batch.column(index).as_ref(), row)?;
            record.insert(field.name().clone(), value);
        }
        records.push(JsonValue::Object(record));
    }

    Ok(records)
}

fn downcast<'a, T: 'static>(array: &'a dyn Array, name: &str) -> Result<&'a T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| Error::output(format!("Failed to downcast to {name}")))
}

/// Convert a single array element to JSON
fn array_value_to_json(array: &dyn Array, row: usize) -> Result<JsonValue> {
    if array.is_null(row) {
        return Ok(JsonValue::Null);
    }

    match array.data_type() {
        DataType::Boolean => {
            let arr = downcast::<BooleanArray>(array, "BooleanArray")?;
            Ok(JsonValue::Bool(arr.value(row)))
        }
        DataType::Int64 => {
            let arr = downcast::<Int64Array>(array, "Int64Array")?;
            Ok(JsonValue::from(arr.value(row)))
        }
        DataType::Float64 => {
            let arr = downcast::<Float64Array>(array, "Float64Array")?;
            Ok(JsonValue::from(arr.value(row)))
        }
        DataType::Utf8 => {
            let arr = downcast::<StringArray>(array, "StringArray")?;
            Ok(JsonValue::String(arr.value(row).to_string()))
        }
        DataType::Timestamp(TimeUnit::Microsecond, _) => {
            let arr = downcast::<TimestampMicrosecondArray>(array, "TimestampMicrosecondArray")?;
            let ts = DateTime::<Utc>::from_timestamp_micros(arr.value(row))
                .ok_or_else(|| Error::output("Timestamp out of range"))?;
            Ok(JsonValue::String(format_timestamp(&ts)))
        }
        other => Err(Error::output(format!("Unsupported Arrow type: {other}"))),
    }
}
