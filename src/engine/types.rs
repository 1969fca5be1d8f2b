//! Engine types
//!
//! Row sinks, queries and fetch statistics.

use crate::error::Result;
use crate::filter::Predicate;
use crate::projection::{project, Column, ProjectionContext, Row};
use crate::types::JsonValue;
use serde::Serialize;

// ============================================================================
// Row Sinks
// ============================================================================

/// Consumer of projected rows
///
/// `wants_more` is the cancellation signal: the fetch loop polls it before
/// every page request and after every emitted row, and stops as soon as it
/// turns false.
pub trait RowSink: Send {
    /// Accept one row
    fn emit(&mut self, row: Row) -> Result<()>;

    /// Whether the consumer still wants rows
    fn wants_more(&self) -> bool {
        true
    }
}

/// Collects every row in memory
#[derive(Debug, Default)]
pub struct CollectSink {
    rows: Vec<Row>,
}

impl CollectSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows collected so far
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Take the collected rows
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl RowSink for CollectSink {
    fn emit(&mut self, row: Row) -> Result<()> {
        self.rows.push(row);
        Ok(())
    }
}

/// Stops the fetch once `limit` rows reached the inner sink
pub struct LimitedSink<'a> {
    inner: &'a mut dyn RowSink,
    remaining: Option<usize>,
    emitted: usize,
}

impl<'a> LimitedSink<'a> {
    /// Wrap `inner`; `None` means no limit
    pub fn new(inner: &'a mut dyn RowSink, limit: Option<usize>) -> Self {
        Self {
            inner,
            remaining: limit,
            emitted: 0,
        }
    }

    /// Rows passed on to the inner sink
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl RowSink for LimitedSink<'_> {
    fn emit(&mut self, row: Row) -> Result<()> {
        match self.remaining {
            Some(0) => Ok(()),
            Some(ref mut n) => {
                *n -= 1;
                self.emitted += 1;
                self.inner.emit(row)
            }
            None => {
                self.emitted += 1;
                self.inner.emit(row)
            }
        }
    }

    fn wants_more(&self) -> bool {
        self.remaining != Some(0) && self.inner.wants_more()
    }
}

/// Drops rows failing any of the predicates the API could not apply
pub struct FilteredSink<'a> {
    inner: &'a mut dyn RowSink,
    predicates: Vec<(usize, Predicate)>,
}

impl<'a> FilteredSink<'a> {
    /// Wrap `inner`; each predicate is paired with its column position
    pub fn new(inner: &'a mut dyn RowSink, predicates: Vec<(usize, Predicate)>) -> Self {
        Self { inner, predicates }
    }
}

impl RowSink for FilteredSink<'_> {
    fn emit(&mut self, row: Row) -> Result<()> {
        let keep = self.predicates.iter().all(|(index, predicate)| {
            row.get(*index)
                .is_some_and(|cell| predicate.matches(cell))
        });
        if keep {
            self.inner.emit(row)?;
        }
        Ok(())
    }

    fn wants_more(&self) -> bool {
        self.inner.wants_more()
    }
}

// ============================================================================
// Projector
// ============================================================================

/// Turns raw API items into rows of a table
#[derive(Debug, Clone, Copy)]
pub struct Projector<'a> {
    columns: &'a [Column],
    context: &'a ProjectionContext,
}

impl<'a> Projector<'a> {
    /// Project onto `columns`, filling scoping-key columns from `context`
    pub fn new(columns: &'a [Column], context: &'a ProjectionContext) -> Self {
        Self { columns, context }
    }

    /// Project one item
    pub fn project(&self, item: &JsonValue) -> Row {
        project(item, self.columns, self.context)
    }
}

// ============================================================================
// Query
// ============================================================================

/// A query against one table
#[derive(Debug, Clone)]
pub struct Query {
    /// Table name, with or without the `gitlab_` prefix
    pub table: String,
    /// Conjunction of predicates
    pub predicates: Vec<Predicate>,
    /// Maximum number of rows
    pub limit: Option<usize>,
}

impl Query {
    /// Query every row of `table`
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            predicates: Vec::new(),
            limit: None,
        }
    }

    /// Add a predicate
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Add several predicates
    #[must_use]
    pub fn filters(mut self, predicates: impl IntoIterator<Item = Predicate>) -> Self {
        self.predicates.extend(predicates);
        self
    }

    /// Stop after `limit` rows
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Statistics from one fetch loop or a whole query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FetchStats {
    /// Rows handed to the sink
    pub rows: usize,
    /// Page requests that returned a page
    pub pages: usize,
    /// Stopped because the sink wanted no more rows
    pub cancelled: bool,
    /// Stopped because the resource was not found
    pub not_found: bool,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl FetchStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page
    pub fn add_page(&mut self) {
        self.pages += 1;
    }

    /// Add a row
    pub fn add_row(&mut self) {
        self.rows += 1;
    }

    /// Fold in the stats of another fetch loop
    pub fn merge(&mut self, other: &FetchStats) {
        self.rows += other.rows;
        self.pages += other.pages;
        self.cancelled |= other.cancelled;
        self.not_found |= other.not_found;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
