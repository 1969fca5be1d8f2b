//! Output module
//!
//! Renders query results.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Building Arrow schemas from table definitions
//! - Converting projected rows to Arrow RecordBatches
//! - Streaming rows as JSON lines
//! - Pretty-printing and writing Parquet files

mod schema;
mod sinks;
mod writer;

pub use schema::{arrow_type, batch_to_json, rows_to_batch, table_schema};
pub use sinks::{pretty_format, BatchSink, JsonLinesSink, DEFAULT_BATCH_SIZE};
pub use writer::{write_parquet, ParquetWriter, ParquetWriterConfig};

#[cfg(test)]
mod tests;
