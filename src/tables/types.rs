//! Table definition types

use crate::filter::{KeyColumn, KeyFilter};
use crate::projection::Column;
use serde::Serialize;

/// Default number of items requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// An endpoint a table can be listed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Path template; `{column}` placeholders are bound by equality predicates
    pub template: &'static str,
    /// Endpoint returns a single object instead of a list
    pub single: bool,
    /// Refuse this route on the public multi-tenant instance
    pub deny_on_public: bool,
    /// Parameters always sent with this route
    pub fixed: Vec<(&'static str, &'static str)>,
}

impl Route {
    /// A paginated list endpoint
    pub fn list(template: &'static str) -> Self {
        Self {
            template,
            single: false,
            deny_on_public: false,
            fixed: Vec::new(),
        }
    }

    /// A single-object endpoint
    pub fn single(template: &'static str) -> Self {
        Self {
            single: true,
            ..Self::list(template)
        }
    }

    /// Always send `key=value`
    #[must_use]
    pub fn with_param(mut self, key: &'static str, value: &'static str) -> Self {
        self.fixed.push((key, value));
        self
    }

    /// Refuse this route on gitlab.com
    #[must_use]
    pub fn deny_on_public(mut self) -> Self {
        self.deny_on_public = true;
        self
    }

    /// Column names bound by the template's placeholders
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        let mut rest = self.template;
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            keys.push(&rest[start + 1..start + len]);
            rest = &rest[start + len + 1..];
        }
        keys
    }

    /// Whether the route lists across the whole instance
    pub fn is_unscoped(&self) -> bool {
        !self.template.contains('{')
    }
}

/// How a table's routes combine into fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    /// Use the first route whose placeholders are all bound
    #[default]
    FirstMatch,
    /// Use every route, one after the other, without deduplication
    Union,
}

/// A queryable table backed by one or more endpoints
#[derive(Debug, Clone)]
pub struct TableDef {
    pub name: &'static str,
    pub description: &'static str,
    pub columns: Vec<Column>,
    pub keys: Vec<KeyColumn>,
    pub routes: Vec<Route>,
    pub plan: PlanKind,
    pub page_size: u32,
    /// Shown when an unscoped listing is refused
    pub scope_hint: &'static str,
}

impl TableDef {
    /// Create an empty table definition
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            columns: Vec::new(),
            keys: Vec::new(),
            routes: Vec::new(),
            plan: PlanKind::FirstMatch,
            page_size: DEFAULT_PAGE_SIZE,
            scope_hint: "",
        }
    }

    #[must_use]
    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn keys(mut self, keys: Vec<KeyColumn>) -> Self {
        self.keys = keys;
        self
    }

    #[must_use]
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Combine every route instead of picking one
    #[must_use]
    pub fn union(mut self) -> Self {
        self.plan = PlanKind::Union;
        self
    }

    #[must_use]
    pub fn scope_hint(mut self, hint: &'static str) -> Self {
        self.scope_hint = hint;
        self
    }

    /// Look up a column and its position
    pub fn column(&self, name: &str) -> Option<(usize, &Column)> {
        self.columns.iter().enumerate().find(|(_, c)| c.name == name)
    }

    /// Look up the pushdown filter of a column
    pub fn key(&self, column: &str) -> Option<&KeyFilter> {
        self.keys
            .iter()
            .find(|k| k.column == column)
            .map(|k| &k.filter)
    }

    /// Columns that can scope a listing (route placeholders), in route order
    pub fn scoping_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        for route in &self.routes {
            for key in route.placeholders() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    /// Columns a query must bind, if no route can be used without a filter
    pub fn required_keys(&self) -> Vec<&'static str> {
        if self.routes.iter().any(Route::is_unscoped) {
            Vec::new()
        } else {
            self.scoping_keys()
        }
    }
}
