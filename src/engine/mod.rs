//! Execution engine module
//!
//! The paginated fetch loop and query orchestration.
//!
//! # Overview
//!
//! The engine module provides:
//! - `fetch_all` - Drives one `FetchRequest` page by page into a `RowSink`
//! - `QueryEngine` - Translates a `Query` and runs its fetch plan
//! - Row sinks for collecting, limiting and client-side filtering

mod types;


pub use types::{CollectSink, FetchStats, FilteredSink, LimitedSink, Projector, Query, RowSink};

use crate::config::Connection;
use crate::error::{Error, Result};
use crate::filter::{translate, FetchPlan, FetchRequest};
use crate::http::HttpClient;
use crate::pagination::{NoPaginator, PageNumberPaginator, PageSource, PaginationState, Paginator};
use crate::projection::Row;
use crate::tables::{self, TableDef};
use crate::types::Deployment;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

// ============================================================================
// Fetch Loop
// ============================================================================

/// Fetch every page of `request`, projecting each item into `sink`
///
/// The sink is asked whether it wants more rows before each page request
/// and after each row; the loop stops issuing requests as soon as it says
/// no. A not-found response ends the listing successfully. Any other
/// failure is fatal and carries the table, page and scope it happened on;
/// rows already emitted stay emitted.
pub async fn fetch_all(
    source: &dyn PageSource,
    request: &FetchRequest,
    projector: &Projector<'_>,
    sink: &mut dyn RowSink,
) -> Result<FetchStats> {
    let paginator: Box<dyn Paginator> = if request.single {
        Box::new(NoPaginator)
    } else {
        Box::new(PageNumberPaginator::new(request.page_size))
    };

    let mut state = PaginationState::new();
    let mut stats = FetchStats::new();

    loop {
        if !sink.wants_more() {
            stats.cancelled = true;
            break;
        }

        let mut query = request.params.clone();
        query.extend(paginator.page_params(&state));
        let page_number = state.page;

        debug!(table = %request.table, path = %request.path, page = page_number, "Fetching page");

        let page = match source.fetch_page(&request.path, &query).await {
            Ok(page) => page,
            Err(e) if e.is_not_found() => {
                warn!(
                    table = %request.table,
                    path = %request.path,
                    page = page_number,
                    "Resource not found, returning no further rows"
                );
                stats.not_found = true;
                break;
            }
            Err(e) => {
                return Err(Error::fetch(
                    &request.table,
                    page_number,
                    request.scope.clone(),
                    e,
                ))
            }
        };

        stats.add_page();

        let mut stopped = false;
        for item in &page.items {
            sink.emit(projector.project(item))?;
            stats.add_row();
            if !sink.wants_more() {
                stopped = true;
                break;
            }
        }

        if stopped {
            stats.cancelled = true;
            break;
        }

        if paginator.process_page(&page, &mut state).is_done() {
            break;
        }
    }

    debug!(
        table = %request.table,
        rows = stats.rows,
        pages = stats.pages,
        cancelled = stats.cancelled,
        "Fetch finished"
    );

    Ok(stats)
}

// ============================================================================
// Query Engine
// ============================================================================

/// Runs queries against a page source
#[derive(Clone)]
pub struct QueryEngine {
    source: Arc<dyn PageSource>,
    deployment: Deployment,
}

/// Look up the table of `query` and translate its predicates for `deployment`
pub fn plan(query: &Query, deployment: Deployment) -> Result<(&'static TableDef, FetchPlan)> {
    let table = tables::table(&query.table)?;
    let plan = translate(table, &query.predicates, deployment)?;
    Ok((table, plan))
}

impl QueryEngine {
    /// Create an engine over any page source
    pub fn new(source: Arc<dyn PageSource>, deployment: Deployment) -> Self {
        Self { source, deployment }
    }

    /// Create an engine talking to the GitLab instance of `connection`
    pub fn from_connection(connection: &Connection) -> Result<Self> {
        let client = HttpClient::from_connection(connection)?;
        Ok(Self::new(Arc::new(client), connection.deployment))
    }

    /// Deployment the engine plans for
    pub fn deployment(&self) -> Deployment {
        self.deployment
    }

    /// Translate `query` without fetching anything
    pub fn plan(&self, query: &Query) -> Result<(&'static TableDef, FetchPlan)> {
        plan(query, self.deployment)
    }

    /// Run `query`, streaming its rows into `sink`
    ///
    /// Translation errors surface before any request is made. Union plans
    /// run their requests one after the other into the same sink.
    pub async fn execute(&self, query: &Query, sink: &mut dyn RowSink) -> Result<FetchStats> {
        let start = Instant::now();
        let (table, plan) = self.plan(query)?;

        let residual = plan
            .residual
            .iter()
            .filter_map(|p| table.column(&p.column).map(|(i, _)| (i, p.clone())))
            .collect();

        let mut limited = LimitedSink::new(sink, query.limit);
        let mut filtered = FilteredSink::new(&mut limited, residual);

        let mut stats = FetchStats::new();
        for request in &plan.requests {
            if !filtered.wants_more() {
                stats.cancelled = true;
                break;
            }
            let projector = Projector::new(&table.columns, &request.context);
            let fetched = fetch_all(self.source.as_ref(), request, &projector, &mut filtered).await?;
            stats.merge(&fetched);
        }

        // Rows that passed the residual filters and the limit
        stats.rows = limited.emitted();
        stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            table = table.name,
            requests = plan.requests.len(),
            rows = stats.rows,
            pages = stats.pages,
            duration_ms = stats.duration_ms,
            "Query complete"
        );

        Ok(stats)
    }

    /// Run `query` and collect its rows
    pub async fn collect(&self, query: &Query) -> Result<(Vec<Row>, FetchStats)> {
        let mut sink = CollectSink::new();
        let stats = self.execute(query, &mut sink).await?;
        Ok((sink.into_rows(), stats))
    }
}

impl std::fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("deployment", &self.deployment)
            .finish_non_exhaustive()
    }
}
