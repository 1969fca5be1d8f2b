//! Textual predicate parser
//!
//! Parses `column<op>literal` strings as typed on the command line or sent
//! to the server, e.g. `project_id=42`, `created_at >= 2024-01-01`,
//! `state='opened'`.

use super::types::{Literal, Operator, Predicate};
use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static PREDICATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*(>=|<=|<>|!=|=|>|<)\s*(.*?)\s*$")
        .expect("predicate pattern is valid")
});

/// Parse one predicate; the literal stays text until translated
pub fn parse_predicate(input: &str) -> Result<Predicate> {
    let caps = PREDICATE
        .captures(input)
        .ok_or_else(|| Error::invalid_predicate(input, "expected <column><op><value>"))?;

    let column = caps[1].to_ascii_lowercase();
    let op = match &caps[2] {
        "=" => Operator::Eq,
        ">" => Operator::Gt,
        ">=" => Operator::Ge,
        "<" => Operator::Lt,
        "<=" => Operator::Le,
        other => {
            return Err(Error::invalid_predicate(
                input,
                format!("operator '{other}' is not supported"),
            ))
        }
    };

    let raw = &caps[3];
    if raw.is_empty() {
        return Err(Error::invalid_predicate(input, "missing value"));
    }

    Ok(Predicate::new(column, op, Literal::Text(unquote(raw).to_string())))
}

/// Parse a list of predicates, failing on the first bad one
pub fn parse_predicates<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<Predicate>> {
    inputs.iter().map(|s| parse_predicate(s.as_ref())).collect()
}

fn unquote(raw: &str) -> &str {
    for quote in ['\'', '"'] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}
