//! Predicate-to-filter translation
//!
//! Turns the predicates of a query into a [`FetchPlan`]: the route to list
//! from, the query parameters the API understands, and the predicates left
//! for client-side evaluation.

use super::types::{
    FetchPlan, FetchRequest, KeyFilter, Literal, Operator, Predicate, RangeFormat,
};
use crate::error::{Error, Result};
use crate::projection::{format_timestamp, ProjectionContext};
use crate::tables::{PlanKind, Route, TableDef};
use crate::types::{Deployment, QueryParams};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tracing::debug;

/// Translate `predicates` on `table` into a fetch plan
///
/// Fails before any request is issued when a column is unknown, a literal
/// does not fit its column, no route can be bound, or the only usable route
/// is an unscoped listing refused on the public deployment.
pub fn translate(
    table: &TableDef,
    predicates: &[Predicate],
    deployment: Deployment,
) -> Result<FetchPlan> {
    let placeholders = table.scoping_keys();
    let typed = coerce_all(table, predicates, &placeholders)?;

    // Equality bindings; the last one wins for a repeated column
    let mut bound: HashMap<&str, &Literal> = HashMap::new();
    for p in typed.iter().filter(|p| p.op == Operator::Eq) {
        bound.insert(p.column.as_str(), &p.value);
    }

    let routes = select_routes(table, &bound, deployment)?;

    let mut requests = Vec::with_capacity(routes.len());
    let mut residual = Vec::new();

    for (i, route) in routes.iter().enumerate() {
        let route_keys = route.placeholders();
        let (params, leftover, context) = push_down(table, route, &route_keys, &typed);
        // Residuals only depend on which placeholders the route consumes;
        // union routes of one table share the same filters
        if i == 0 {
            residual = leftover;
        }

        let scope: Vec<(String, String)> = route_keys
            .iter()
            .filter_map(|k| bound.get(k).map(|v| ((*k).to_string(), v.to_param())))
            .collect();

        requests.push(FetchRequest {
            table: table.name.to_string(),
            path: render_path(route.template, &bound),
            params,
            page_size: table.page_size,
            single: route.single,
            scope,
            context,
        });
    }

    debug!(
        table = table.name,
        requests = requests.len(),
        residual = residual.len(),
        "Translated predicates"
    );

    Ok(FetchPlan { requests, residual })
}

/// Check every column and coerce each literal to its column type
fn coerce_all(
    table: &TableDef,
    predicates: &[Predicate],
    placeholders: &[&'static str],
) -> Result<Vec<Predicate>> {
    predicates
        .iter()
        .map(|p| {
            let (_, column) = table
                .column(&p.column)
                .ok_or_else(|| Error::unknown_column(table.name, &p.column))?;

            let value = match p.value.coerce(column.column_type) {
                Ok(value) => value,
                // Scoping keys also accept paths such as `group/project`
                Err(_) if p.op == Operator::Eq && placeholders.contains(&column.name) => {
                    Literal::Text(p.value.to_param())
                }
                Err(message) => return Err(Error::invalid_predicate(p.to_string(), message)),
            };

            Ok(Predicate::new(p.column.clone(), p.op, value))
        })
        .collect()
}

/// Pick the routes a query runs against
fn select_routes<'t>(
    table: &'t TableDef,
    bound: &HashMap<&str, &Literal>,
    deployment: Deployment,
) -> Result<Vec<&'t Route>> {
    let is_bound = |route: &Route| route.placeholders().iter().all(|k| bound.contains_key(k));

    match table.plan {
        PlanKind::Union => {
            if let Some(route) = table.routes.iter().find(|r| !is_bound(r)) {
                return Err(missing_key(table, route.placeholders()));
            }
            Ok(table.routes.iter().collect())
        }
        PlanKind::FirstMatch => {
            let mut refused = false;
            for route in table.routes.iter().filter(|r| is_bound(r)) {
                if route.deny_on_public && deployment.is_public() {
                    refused = true;
                    continue;
                }
                return Ok(vec![route]);
            }

            if refused {
                Err(Error::UnscopedFetch {
                    table: table.name.to_string(),
                    hint: table.scope_hint.to_string(),
                })
            } else {
                Err(missing_key(table, table.scoping_keys()))
            }
        }
    }
}

fn missing_key(table: &TableDef, columns: Vec<&'static str>) -> Error {
    Error::MissingKey {
        table: table.name.to_string(),
        columns: columns.into_iter().map(String::from).collect(),
    }
}

/// Split predicates into API parameters and residual predicates for `route`
///
/// Only equalities the request itself enforces, through the path or a
/// pushed-down parameter, fill the projection context. Day-granular range
/// bounds are wider than the predicate and stay residual as well.
fn push_down(
    table: &TableDef,
    route: &Route,
    route_keys: &[&'static str],
    predicates: &[Predicate],
) -> (QueryParams, Vec<Predicate>, ProjectionContext) {
    let mut params: QueryParams = route
        .fixed
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    let mut residual = Vec::new();
    let mut context = ProjectionContext::new();

    for p in predicates {
        if p.op == Operator::Eq && route_keys.iter().any(|k| *k == p.column) {
            context.set_qual(p.column.as_str(), p.value.to_json());
            continue;
        }

        let pushed = match (table.key(&p.column), p.op) {
            (Some(KeyFilter::Param(param)), Operator::Eq) => {
                params.insert((*param).to_string(), p.value.to_param());
                context.set_qual(p.column.as_str(), p.value.to_json());
                true
            }
            (Some(KeyFilter::Enum(param)), Operator::Eq) => {
                params.insert((*param).to_string(), p.value.to_param().to_lowercase());
                context.set_qual(p.column.as_str(), p.value.to_json());
                true
            }
            (
                Some(KeyFilter::Range {
                    after,
                    before,
                    format,
                }),
                op,
            ) => match &p.value {
                Literal::Timestamp(ts) => {
                    let (lower, upper) = window(op, *ts);
                    if let Some(lower) = lower {
                        params.insert((*after).to_string(), render_bound(lower, *format));
                    }
                    if let Some(upper) = upper {
                        params.insert((*before).to_string(), render_bound(upper, *format));
                    }
                    *format == RangeFormat::Rfc3339
                }
                _ => false,
            },
            _ => false,
        };

        if !pushed {
            residual.push(p.clone());
        }
    }

    (params, residual, context)
}

/// Inclusive `(after, before)` bounds for a timestamp comparison
///
/// The API bounds are inclusive, so strict comparators move one second
/// past the literal and equality becomes a two-second window around it.
pub fn window(
    op: Operator,
    ts: DateTime<Utc>,
) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let second = Duration::seconds(1);
    match op {
        Operator::Eq => (Some(ts - second), Some(ts + second)),
        Operator::Gt => (Some(ts + second), None),
        Operator::Ge => (Some(ts), None),
        Operator::Lt => (None, Some(ts - second)),
        Operator::Le => (None, Some(ts)),
    }
}

fn render_bound(ts: DateTime<Utc>, format: RangeFormat) -> String {
    match format {
        RangeFormat::Rfc3339 => format_timestamp(&ts),
        RangeFormat::Date => ts.format("%Y-%m-%d").to_string(),
    }
}

/// Substitute bound values into a route template, percent-encoded
fn render_path(template: &str, bound: &HashMap<&str, &Literal>) -> String {
    let mut path = template.to_string();
    for (column, value) in bound {
        let placeholder = format!("{{{column}}}");
        if path.contains(&placeholder) {
            path = path.replace(&placeholder, &encode_segment(&value.to_param()));
        }
    }
    path
}

/// Percent-encode one path segment
pub fn encode_segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
