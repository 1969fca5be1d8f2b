//! HTTP server mode for REST API access to the table catalog

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::cli::runner::{describe_plan, describe_table};
use crate::config::Connection;
use crate::engine::{Query, QueryEngine};
use crate::error::{Error, Result};
use crate::filter::parse_predicates;
use crate::tables;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Connection every query is run against
    pub connection: Connection,
}

/// App state shared across handlers
#[derive(Clone)]
struct AppState {
    engine: QueryEngine,
}

/// Request body for the query and explain endpoints
#[derive(Debug, Deserialize)]
struct QueryRequest {
    /// Table name (the gitlab_ prefix is optional)
    table: String,
    /// Predicates such as `project_id=42`
    #[serde(default, rename = "where")]
    predicates: Vec<String>,
    /// Maximum number of rows
    #[serde(default)]
    limit: Option<usize>,
}

impl QueryRequest {
    fn to_query(&self) -> Result<Query> {
        Ok(Query {
            table: self.table.clone(),
            predicates: parse_predicates(&self.predicates)?,
            limit: self.limit,
        })
    }
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// HTTP status for a failed request
fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::UnknownTable { .. } => StatusCode::NOT_FOUND,
        e if e.is_translation() => StatusCode::BAD_REQUEST,
        Error::Fetch { .. } | Error::Http(_) | Error::HttpStatus { .. } | Error::Decode { .. } => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: &Error) -> Response {
    (
        status_for(error),
        Json(ApiResponse::<()>::error(error.to_string())),
    )
        .into_response()
}

/// Build the router over an engine
pub fn router(engine: QueryEngine) -> Router {
    let state = AppState { engine };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/tables", get(list_tables))
        .route("/tables/:name", get(get_table))
        .route("/query", post(run_query))
        .route("/explain", post(explain))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, port: u16) -> Result<()> {
    let engine = QueryEngine::from_connection(&config.connection)?;
    let app = router(engine);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(
        base_url = %config.connection.base_url,
        "Starting HTTP server on http://{}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// List the catalog
async fn list_tables() -> impl IntoResponse {
    let tables: Vec<Value> = tables::catalog()
        .iter()
        .map(|t| {
            json!({
                "name": t.name,
                "description": t.description,
                "required_keys": t.required_keys(),
            })
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(json!({ "tables": tables }))),
    )
        .into_response()
}

/// Describe one table
async fn get_table(Path(name): Path<String>) -> Response {
    match tables::table(&name) {
        Ok(table) => (
            StatusCode::OK,
            Json(ApiResponse::success(describe_table(table))),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Run a query and return its rows
async fn run_query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Response {
    let query = match request.to_query() {
        Ok(q) => q,
        Err(e) => return error_response(&e),
    };

    let table = match tables::table(&query.table) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };

    match state.engine.collect(&query).await {
        Ok((rows, stats)) => {
            let columns: Vec<&str> = table.columns.iter().map(|c| c.name).collect();
            let rows: Vec<Value> = rows
                .iter()
                .map(|r| Value::Object(r.to_object(&table.columns)))
                .collect();

            (
                StatusCode::OK,
                Json(ApiResponse::success(json!({
                    "table": table.name,
                    "columns": columns,
                    "rows": rows,
                    "stats": stats,
                }))),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(table = table.name, error = %e, "Query failed");
            error_response(&e)
        }
    }
}

/// Show the fetch plan of a query without running it
async fn explain(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Response {
    let planned = request
        .to_query()
        .and_then(|query| state.engine.plan(&query));

    match planned {
        Ok((table, plan)) => (
            StatusCode::OK,
            Json(ApiResponse::success(describe_plan(table, &plan))),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}
