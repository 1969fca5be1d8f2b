//! Tests for output module

use super::*;
use crate::engine::RowSink;
use crate::projection::{Column, Row};
use arrow::array::Array;
use arrow::datatypes::{DataType, TimeUnit};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs::File;
use tempfile::tempdir;

fn columns() -> Vec<Column> {
    vec![
        Column::int("id", "ID"),
        Column::text("title", "Title"),
        Column::double("score", "Score"),
        Column::bool("confidential", "Confidential"),
        Column::timestamp("created_at", "Created"),
        Column::json("labels", "Labels"),
    ]
}

fn rows() -> Vec<Row> {
    vec![
        Row::new(vec![
            json!(1),
            json!("First"),
            json!(1.5),
            json!(false),
            json!("2024-01-02T03:04:05Z"),
            json!(["bug", "p1"]),
        ]),
        Row::new(vec![
            json!(2),
            Value::Null,
            Value::Null,
            json!(true),
            Value::Null,
            json!([]),
        ]),
    ]
}

// ============================================================================
// Schema Tests
// ============================================================================

#[test]
fn test_table_schema_types() {
    let schema = table_schema(&columns());
    let types: Vec<DataType> = schema
        .fields()
        .iter()
        .map(|f| f.data_type().clone())
        .collect();

    assert_eq!(
        types,
        vec![
            DataType::Int64,
            DataType::Utf8,
            DataType::Float64,
            DataType::Boolean,
            DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
            DataType::Utf8,
        ]
    );
    assert!(schema.fields().iter().all(|f| f.is_nullable()));
    assert_eq!(schema.field(0).name(), "id");
}

#[test]
fn test_rows_to_batch() {
    let batch = rows_to_batch(&columns(), &rows()).unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 6);

    // nulls survive the conversion
    assert!(batch.column(1).is_null(1));
    assert!(batch.column(4).is_null(1));
    assert!(!batch.column(5).is_null(1));
}

#[test]
fn test_rows_to_batch_empty_keeps_schema() {
    let batch = rows_to_batch(&columns(), &[]).unwrap();
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.schema().fields().len(), 6);
}

#[test]
fn test_batch_round_trip_values() {
    let batch = rows_to_batch(&columns(), &rows()).unwrap();
    let records = batch_to_json(&batch).unwrap();

    assert_eq!(
        records[0],
        json!({
            "id": 1,
            "title": "First",
            "score": 1.5,
            "confidential": false,
            "created_at": "2024-01-02T03:04:05Z",
            "labels": "[\"bug\",\"p1\"]"
        })
    );
    assert_eq!(records[1]["title"], Value::Null);
    assert_eq!(records[1]["labels"], json!("[]"));
}

#[test]
fn test_mistyped_cells_become_null() {
    let columns = vec![Column::int("id", ""), Column::timestamp("at", "")];
    let rows = vec![Row::new(vec![json!("seven"), json!("not a date")])];

    let batch = rows_to_batch(&columns, &rows).unwrap();
    assert!(batch.column(0).is_null(0));
    assert!(batch.column(1).is_null(0));
}

// ============================================================================
// Sink Tests
// ============================================================================

#[test]
fn test_json_lines_sink() {
    let columns = columns();
    let mut sink = JsonLinesSink::new(&columns, Vec::new());
    for row in rows() {
        sink.emit(row).unwrap();
    }
    assert_eq!(sink.rows(), 2);

    let output = String::from_utf8(sink.finish().unwrap()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[1],
        r#"{"id":2,"title":null,"score":null,"confidential":true,"created_at":null,"labels":[]}"#
    );
}

#[test]
fn test_batch_sink_splits_batches() {
    let columns = columns();
    let mut sink = BatchSink::with_batch_size(&columns, 1);
    for row in rows() {
        sink.emit(row).unwrap();
    }
    sink.emit(rows().remove(0)).unwrap();

    let batches = sink.finish().unwrap();
    assert_eq!(batches.len(), 3);
    assert!(batches.iter().all(|b| b.num_rows() == 1));
}

#[test]
fn test_batch_sink_empty() {
    let columns = columns();
    let batches = BatchSink::new(&columns).finish().unwrap();
    assert!(batches.is_empty());
}

#[test]
fn test_pretty_format() {
    let columns = columns();
    let batch = rows_to_batch(&columns, &rows()).unwrap();
    let table = pretty_format(&columns, &[batch]).unwrap();

    assert!(table.contains("| id "));
    assert!(table.contains("First"));
    assert!(table.contains("2024-01-02T03:04:05"));

    let empty = pretty_format(&columns, &[]).unwrap();
    assert!(empty.contains("created_at"));
}

// ============================================================================
// Parquet Tests
// ============================================================================

#[test]
fn test_parquet_writer_config() {
    let config = ParquetWriterConfig::new().with_row_group_size(10).uncompressed();
    assert_eq!(config.row_group_size(), 10);
    assert_eq!(ParquetWriterConfig::default().row_group_size(), 64 * 1024);
}

#[test]
fn test_write_parquet_and_read_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("issues.parquet");
    let columns = columns();
    let batch = rows_to_batch(&columns, &rows()).unwrap();

    let written = write_parquet(&path, &columns, &[batch.clone(), batch], None).unwrap();
    assert_eq!(written, 4);

    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let batches: Vec<_> = reader.map(Result::unwrap).collect();
    let total: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(total, 4);

    let records = batch_to_json(&batches[0]).unwrap();
    assert_eq!(records[0]["created_at"], json!("2024-01-02T03:04:05Z"));
    assert_eq!(records[0]["id"], json!(1));
}

#[test]
fn test_write_parquet_without_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.parquet");

    let written = write_parquet(&path, &columns(), &[], None).unwrap();
    assert_eq!(written, 0);
    assert!(path.exists());
}

#[test]
fn test_parquet_writer_counts_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("writer.parquet");
    let columns = columns();
    let config = ParquetWriterConfig::new();

    let mut writer = ParquetWriter::for_table(&path, &columns, &config).unwrap();
    assert_eq!(writer.rows_written(), 0);
    writer
        .write(&rows_to_batch(&columns, &rows()).unwrap())
        .unwrap();
    assert_eq!(writer.rows_written(), 2);
    assert_eq!(writer.close().unwrap(), 2);
}
