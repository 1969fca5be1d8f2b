//! Row sinks that render query results

use super::schema::rows_to_batch;
use crate::engine::RowSink;
use crate::error::Result;
use crate::projection::{Column, Row};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use std::io::Write;

/// Rows per RecordBatch
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Writes each row as one JSON object per line, keys in column order
pub struct JsonLinesSink<'a, W: Write + Send> {
    columns: &'a [Column],
    writer: W,
    rows: usize,
}

impl<'a, W: Write + Send> JsonLinesSink<'a, W> {
    /// Write rows of `columns` to `writer`
    pub fn new(columns: &'a [Column], writer: W) -> Self {
        Self {
            columns,
            writer,
            rows: 0,
        }
    }

    /// Rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and return the writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write + Send> RowSink for JsonLinesSink<'_, W> {
    fn emit(&mut self, row: Row) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &row.to_object(self.columns))?;
        self.writer.write_all(b"\n")?;
        self.rows += 1;
        Ok(())
    }
}

/// Groups rows into Arrow RecordBatches
pub struct BatchSink<'a> {
    columns: &'a [Column],
    batch_size: usize,
    pending: Vec<Row>,
    batches: Vec<RecordBatch>,
}

impl<'a> BatchSink<'a> {
    /// Collect rows of `columns` in batches of [`DEFAULT_BATCH_SIZE`]
    pub fn new(columns: &'a [Column]) -> Self {
        Self::with_batch_size(columns, DEFAULT_BATCH_SIZE)
    }

    /// Collect rows of `columns` in batches of `batch_size`
    pub fn with_batch_size(columns: &'a [Column], batch_size: usize) -> Self {
        Self {
            columns,
            batch_size: batch_size.max(1),
            pending: Vec::new(),
            batches: Vec::new(),
        }
    }

    fn flush(&mut self) -> Result<()> {
        if !self.pending.is_empty() {
            let rows = std::mem::take(&mut self.pending);
            self.batches.push(rows_to_batch(self.columns, &rows)?);
        }
        Ok(())
    }

    /// Convert the remaining rows and return every batch
    pub fn finish(mut self) -> Result<Vec<RecordBatch>> {
        self.flush()?;
        Ok(self.batches)
    }
}

impl RowSink for BatchSink<'_> {
    fn emit(&mut self, row: Row) -> Result<()> {
        self.pending.push(row);
        if self.pending.len() >= self.batch_size {
            self.flush()?;
        }
        Ok(())
    }
}

/// Render batches as an ASCII table
pub fn pretty_format(columns: &[Column], batches: &[RecordBatch]) -> Result<String> {
    if batches.is_empty() {
        let empty = rows_to_batch(columns, &[])?;
        return Ok(pretty_format_batches(&[empty])?.to_string());
    }
    Ok(pretty_format_batches(batches)?.to_string())
}
