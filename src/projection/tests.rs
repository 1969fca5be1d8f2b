//! Tests for projection module

use super::*;
use crate::types::ColumnType;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

// ============================================================================
// Path Tests
// ============================================================================

#[test]
fn test_get_path_nested() {
    let item = json!({"author": {"id": 7, "username": "alice"}});
    assert_eq!(get_path(&item, "author.username"), Some(&json!("alice")));
    assert_eq!(get_path(&item, "$.author.id"), Some(&json!(7)));
}

#[test]
fn test_get_path_absent_or_null() {
    let item = json!({"author": null, "milestone": {"title": "v1"}});
    assert_eq!(get_path(&item, "author.username"), None);
    assert_eq!(get_path(&item, "author"), None);
    assert_eq!(get_path(&item, "reviewer.id"), None);
    assert_eq!(get_path(&item, "milestone.title.deeper"), None);
}

#[test]
fn test_get_path_array_index() {
    let item = json!({"assignees": [{"id": 1}, {"id": 2}]});
    assert_eq!(get_path(&item, "assignees.1.id"), Some(&json!(2)));
    assert_eq!(get_path(&item, "assignees.5.id"), None);
    assert_eq!(get_path(&item, "assignees.x"), None);
}

// ============================================================================
// Transform Tests
// ============================================================================

#[test_case(0, "No Permissions")]
#[test_case(5, "Minimal Access")]
#[test_case(10, "Guest")]
#[test_case(20, "Reporter")]
#[test_case(30, "Developer")]
#[test_case(40, "Maintainer")]
#[test_case(50, "Owner")]
#[test_case(99, "No Permissions" ; "unrecognized code")]
#[test_case(-1, "No Permissions" ; "negative code")]
fn test_access_level_label(code: i64, expected: &str) {
    assert_eq!(access_level_label(code), expected);
}

#[test]
fn test_date_only_to_timestamp() {
    let ts = date_only_to_timestamp("2024-03-15").unwrap();
    assert_eq!(format_timestamp(&ts), "2024-03-15T00:00:00Z");
    assert!(date_only_to_timestamp("2024-13-01").is_none());
    assert!(date_only_to_timestamp("yesterday").is_none());
}

#[test]
fn test_parse_timestamp_shapes() {
    assert_eq!(
        normalize_timestamp("2024-01-02T03:04:05.000+02:00").as_deref(),
        Some("2024-01-02T01:04:05Z")
    );
    assert_eq!(
        normalize_timestamp("2024-01-02T03:04:05.123Z").as_deref(),
        Some("2024-01-02T03:04:05.123Z")
    );
    assert_eq!(
        normalize_timestamp("2024-01-02 03:04:05").as_deref(),
        Some("2024-01-02T03:04:05Z")
    );
    assert_eq!(
        normalize_timestamp("2024-01-02").as_deref(),
        Some("2024-01-02T00:00:00Z")
    );
    assert!(parse_timestamp("soon").is_none());
}

#[test]
fn test_display_names() {
    let assignees = json!([
        {"username": "zed"},
        {"username": "amy"},
        {"name": "no username"}
    ]);
    assert_eq!(display_names(&assignees, "username"), json!(["zed", "amy"]));
    assert_eq!(display_names(&Value::Null, "username"), Value::Null);
    assert_eq!(display_names(&json!([]), "username"), json!([]));
}

// ============================================================================
// Column Projection Tests
// ============================================================================

#[test]
fn test_direct_and_nested_columns() {
    let columns = vec![
        Column::int("id", "ID"),
        Column::int("author_id", "Author ID").at("author.id"),
        Column::text("author_username", "Author").at("author.username"),
    ];
    let item = json!({"id": 3, "author": {"id": 9, "username": "bob"}});

    let row = project(&item, &columns, &ProjectionContext::new());
    assert_eq!(row.values(), &[json!(3), json!(9), json!("bob")]);
}

#[test]
fn test_missing_nested_path_is_null() {
    let columns = vec![Column::text("milestone_title", "Milestone").at("milestone.title")];
    let row = project(&json!({"milestone": null}), &columns, &ProjectionContext::new());
    assert_eq!(row.get(0), Some(&Value::Null));
}

#[test]
fn test_zero_value_suppression() {
    let columns = vec![
        Column::text("bio", "Bio").null_if_zero(),
        Column::int("parent_id", "Parent").null_if_zero(),
        Column::text("location", "Location"),
        Column::int("star_count", "Stars"),
    ];
    let item = json!({"bio": "", "parent_id": 0, "location": "", "star_count": 0});

    let row = project(&item, &columns, &ProjectionContext::new());
    assert_eq!(
        row.values(),
        &[Value::Null, Value::Null, json!(""), json!(0)]
    );
}

#[test]
fn test_named_transforms() {
    let columns = vec![
        Column::timestamp("due_date", "Due").transform(Transform::DateOnly),
        Column::text("access_level", "Access").transform(Transform::AccessLevel),
        Column::json("assignees", "Assignees").transform(Transform::Names("username")),
    ];
    let item = json!({
        "due_date": "2024-06-30",
        "access_level": 40,
        "assignees": [{"username": "a"}, {"username": "b"}]
    });

    let row = project(&item, &columns, &ProjectionContext::new());
    assert_eq!(
        row.values(),
        &[json!("2024-06-30T00:00:00Z"), json!("Maintainer"), json!(["a", "b"])]
    );

    let empty = project(&json!({}), &columns, &ProjectionContext::new());
    assert_eq!(empty.values(), &[Value::Null, Value::Null, Value::Null]);
}

#[test]
fn test_qual_source() {
    let columns = vec![
        Column::text("id", "SHA"),
        Column::int("project_id", "Project").from_qual("project_id"),
    ];
    let ctx = ProjectionContext::new().with_qual("project_id", 42);

    let row = project(&json!({"id": "abc123"}), &columns, &ctx);
    assert_eq!(row.values(), &[json!("abc123"), json!(42)]);

    let row = project(&json!({"id": "abc123"}), &columns, &ProjectionContext::new());
    assert_eq!(row.get(1), Some(&Value::Null));
}

#[test_case(ColumnType::Int, json!("17"), json!(17))]
#[test_case(ColumnType::Int, json!(true), Value::Null ; "bool into int")]
#[test_case(ColumnType::Double, json!(2), json!(2.0))]
#[test_case(ColumnType::Text, json!(5), json!("5") ; "number into text")]
#[test_case(ColumnType::Text, json!({"a": 1}), json!("{\"a\":1}") ; "object into text")]
#[test_case(ColumnType::Bool, json!("true"), Value::Null ; "string into bool")]
#[test_case(ColumnType::Timestamp, json!("2024-01-01T00:00:00.000Z"), json!("2024-01-01T00:00:00Z"))]
#[test_case(ColumnType::Timestamp, json!("garbage"), Value::Null ; "bad timestamp")]
#[test_case(ColumnType::Json, json!([1, 2]), json!([1, 2]))]
fn test_coercion(column_type: ColumnType, raw: Value, expected: Value) {
    let column = Column::new("value", column_type, "");
    let cell = column.project(&json!({ "value": raw }), &ProjectionContext::new());
    assert_eq!(cell, expected);
}

#[test]
fn test_row_to_object_keeps_column_order() {
    let columns = vec![Column::text("z", ""), Column::text("a", "")];
    let row = Row::new(vec![json!("last"), json!("first")]);
    let obj = row.to_object(&columns);

    let keys: Vec<&String> = obj.keys().collect();
    assert_eq!(keys, vec!["z", "a"]);
    assert_eq!(row.len(), 2);
    assert!(!row.is_empty());
}
