//! Tests for predicate parsing and translation

use super::*;
use crate::error::Error;
use crate::tables::table;
use crate::types::Deployment;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn plan(name: &str, predicates: &[&str]) -> crate::error::Result<FetchPlan> {
    let predicates = parse_predicates(predicates)?;
    translate(table(name)?, &predicates, Deployment::SelfManaged)
}

fn params(plan: &FetchPlan) -> Vec<(&str, &str)> {
    plan.requests[0]
        .params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

// ============================================================================
// Parser Tests
// ============================================================================

#[test_case("project_id=42", "project_id", Operator::Eq, "42")]
#[test_case("created_at >= 2024-01-01", "created_at", Operator::Ge, "2024-01-01")]
#[test_case("state = 'opened'", "state", Operator::Eq, "opened")]
#[test_case("Title=\"a = b\"", "title", Operator::Eq, "a = b" ; "quoted value with operator")]
#[test_case("updated_at<2024-01-01T00:00:00Z", "updated_at", Operator::Lt, "2024-01-01T00:00:00Z")]
#[test_case("weight<=3", "weight", Operator::Le, "3")]
#[test_case("weight>3", "weight", Operator::Gt, "3")]
fn test_parse_predicate(input: &str, column: &str, op: Operator, value: &str) {
    let predicate = parse_predicate(input).unwrap();
    assert_eq!(predicate, Predicate::new(column, op, value));
}

#[test_case("state != opened" ; "not equal")]
#[test_case("state <> opened" ; "sql not equal")]
#[test_case("state =" ; "missing value")]
#[test_case("= opened" ; "missing column")]
#[test_case("just words" ; "no operator")]
fn test_parse_predicate_rejects(input: &str) {
    let err = parse_predicate(input).unwrap_err();
    assert!(matches!(err, Error::InvalidPredicate { .. }), "{err}");
}

#[test]
fn test_predicate_matches_cells() {
    assert!(Predicate::gt("weight", 3_i64).matches(&json!(5)));
    assert!(!Predicate::gt("weight", 3_i64).matches(&json!(3)));
    assert!(Predicate::le("weight", 3.5).matches(&json!(3)));
    assert!(Predicate::eq("title", "x").matches(&json!("x")));
    assert!(!Predicate::eq("title", "x").matches(&serde_json::Value::Null));

    let noon = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    assert!(Predicate::ge("created_at", noon).matches(&json!("2024-01-01T12:00:00Z")));
    assert!(!Predicate::ge("created_at", noon).matches(&json!("2024-01-01T11:59:59Z")));
}

// ============================================================================
// Timestamp Window Tests
// ============================================================================

#[test_case("=", Some("2024-03-01T09:59:59Z"), Some("2024-03-01T10:00:01Z"))]
#[test_case(">", Some("2024-03-01T10:00:01Z"), None)]
#[test_case(">=", Some("2024-03-01T10:00:00Z"), None)]
#[test_case("<", None, Some("2024-03-01T09:59:59Z"))]
#[test_case("<=", None, Some("2024-03-01T10:00:00Z"))]
fn test_timestamp_window(op: &str, after: Option<&str>, before: Option<&str>) {
    let predicate = format!("created_at {op} 2024-03-01T10:00:00Z");
    let plan = plan("gitlab_issue", &[predicate.as_str()]).unwrap();
    let params = &plan.requests[0].params;

    assert_eq!(params.get("created_after").map(String::as_str), after);
    assert_eq!(params.get("created_before").map(String::as_str), before);
    assert!(plan.residual.is_empty());
}

#[test]
fn test_window_helper() {
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let (after, before) = window(Operator::Eq, ts);
    assert_eq!((before.unwrap() - after.unwrap()).num_seconds(), 2);
}

#[test]
fn test_date_only_literal_and_date_range() {
    let plan = plan(
        "gitlab_event",
        &["created_at >= 2024-05-01", "created_at < 2024-06-01"],
    )
    .unwrap();
    assert_eq!(
        params(&plan),
        vec![("after", "2024-05-01"), ("before", "2024-05-31")]
    );
}

#[test]
fn test_date_range_keeps_predicate_for_client_side_check() {
    let before = plan("gitlab_event", &["created_at < 2024-05-05T12:00:00Z"]).unwrap();
    assert_eq!(params(&before), vec![("before", "2024-05-05")]);
    let residual: Vec<String> = before.residual.iter().map(ToString::to_string).collect();
    assert_eq!(residual, vec!["created_at < 2024-05-05T12:00:00Z"]);

    let after = plan("gitlab_event", &["created_at >= 2024-05-05T12:00:00Z"]).unwrap();
    assert_eq!(params(&after), vec![("after", "2024-05-05")]);
    assert_eq!(after.residual.len(), 1);
}

#[test]
fn test_commit_range_maps_to_since_until() {
    let plan = plan(
        "gitlab_commit",
        &[
            "project_id = 7",
            "committed_date > 2024-01-01 00:00:00",
            "committed_date <= 2024-02-01",
        ],
    )
    .unwrap();
    assert_eq!(
        params(&plan),
        vec![
            ("since", "2024-01-01T00:00:01Z"),
            ("until", "2024-02-01T00:00:00Z")
        ]
    );
}

// ============================================================================
// Pushdown Tests
// ============================================================================

#[test]
fn test_enum_values_are_lowercased() {
    let plan = plan(
        "gitlab_event",
        &["action = Pushed", "target_type = MergeRequest"],
    )
    .unwrap();
    assert_eq!(
        params(&plan),
        vec![("action", "pushed"), ("target_type", "mergerequest")]
    );
    assert_eq!(plan.requests[0].context.qual("action"), Some(&json!("Pushed")));
}

#[test]
fn test_param_values_keep_case() {
    let plan = plan(
        "gitlab_merge_request",
        &["project_id = 1", "source_branch = Feature/X", "state = Opened"],
    )
    .unwrap();
    assert_eq!(
        params(&plan),
        vec![("source_branch", "Feature/X"), ("state", "opened")]
    );
}

#[test]
fn test_typed_literals_render_as_params() {
    let plan = plan(
        "gitlab_project",
        &["owner_id = 12", "archived = TRUE", "visibility = Public"],
    )
    .unwrap();
    assert_eq!(plan.requests[0].path, "/users/12/projects");
    assert_eq!(
        params(&plan),
        vec![("archived", "true"), ("visibility", "public")]
    );
}

#[test]
fn test_unsupported_comparisons_become_residual() {
    let plan = plan(
        "gitlab_issue",
        &["project_id = 3", "state > opened", "title = Crash", "weight >= 2"],
    )
    .unwrap();

    assert!(params(&plan).is_empty());
    let residual: Vec<String> = plan.residual.iter().map(ToString::to_string).collect();
    assert_eq!(residual, vec!["state > opened", "title = Crash", "weight >= 2"]);
    assert_eq!(plan.residual[2].value, Literal::Int(2));
}

#[test]
fn test_bad_literal_is_rejected() {
    let err = plan("gitlab_issue", &["weight = heavy"]).unwrap_err();
    assert!(matches!(err, Error::InvalidPredicate { .. }), "{err}");

    let err = plan("gitlab_issue", &["created_at > someday"]).unwrap_err();
    assert!(matches!(err, Error::InvalidPredicate { .. }), "{err}");
}

#[test]
fn test_unknown_column_is_rejected() {
    let err = plan("gitlab_issue", &["colour = red"]).unwrap_err();
    assert!(
        matches!(err, Error::UnknownColumn { ref table, ref column }
            if table == "gitlab_issue" && column == "colour")
    );
}

// ============================================================================
// Route Selection Tests
// ============================================================================

#[test]
fn test_first_bound_route_wins() {
    let project = plan("gitlab_issue", &["project_id = 5", "group_id = 9"]).unwrap();
    assert_eq!(project.requests.len(), 1);
    assert_eq!(project.requests[0].path, "/projects/5/issues");
    assert_eq!(
        project.requests[0].scope,
        vec![("project_id".to_string(), "5".to_string())]
    );

    let group = plan("gitlab_issue", &["group_id = 9"]).unwrap();
    assert_eq!(group.requests[0].path, "/groups/9/issues");
    assert_eq!(group.requests[0].context.qual("group_id"), Some(&json!(9)));

    let all = plan("gitlab_issue", &[]).unwrap();
    assert_eq!(all.requests[0].path, "/issues");
    assert_eq!(params(&all), vec![("scope", "all")]);
    assert!(all.requests[0].scope.is_empty());
}

#[test]
fn test_unused_scoping_key_stays_residual() {
    let plan = plan("gitlab_issue", &["project_id = 7", "group_id = 99"]).unwrap();
    let request = &plan.requests[0];

    assert_eq!(request.path, "/projects/7/issues");
    assert_eq!(request.context.qual("project_id"), Some(&json!(7)));
    assert_eq!(request.context.qual("group_id"), None);

    let residual: Vec<String> = plan.residual.iter().map(ToString::to_string).collect();
    assert_eq!(residual, vec!["group_id = 99"]);
}

#[test]
fn test_single_route() {
    let plan = plan("gitlab_project", &["id = 278964"]).unwrap();
    let request = &plan.requests[0];
    assert_eq!(request.path, "/projects/278964");
    assert!(request.single);
    assert_eq!(request.table, "gitlab_project");
}

#[test]
fn test_path_placeholders_are_encoded() {
    let plan = plan("gitlab_commit", &["project_id = 'gitlab-org/gitlab'"]).unwrap();
    assert_eq!(
        plan.requests[0].path,
        "/projects/gitlab-org%2Fgitlab/repository/commits"
    );
    assert_eq!(plan.requests[0].page_size, 50);
    assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
}

#[test]
fn test_missing_scoping_key() {
    let err = plan("gitlab_commit", &["committed_date > 2024-01-01"]).unwrap_err();
    match err {
        Error::MissingKey { table, columns } => {
            assert_eq!(table, "gitlab_commit");
            assert_eq!(columns, vec!["project_id"]);
        }
        other => panic!("unexpected error: {other}"),
    }

    // a comparator does not bind a scoping key
    let err = plan("gitlab_branch", &["project_id > 3"]).unwrap_err();
    assert!(matches!(err, Error::MissingKey { .. }));
}

#[test]
fn test_unscoped_listing_on_public_deployment() {
    let projects = table("gitlab_project").unwrap();
    let err = translate(projects, &[], Deployment::Public).unwrap_err();
    match err {
        Error::UnscopedFetch { table, hint } => {
            assert_eq!(table, "gitlab_project");
            assert!(hint.contains("owner_id"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let users = table("gitlab_user").unwrap();
    let err = translate(users, &[Predicate::eq("username", "root")], Deployment::Public)
        .unwrap_err();
    assert!(matches!(err, Error::UnscopedFetch { .. }));

    let plan = translate(projects, &[], Deployment::SelfManaged).unwrap();
    assert_eq!(plan.requests[0].path, "/projects");

    let plan = translate(projects, &[Predicate::eq("id", 1_i64)], Deployment::Public).unwrap();
    assert_eq!(plan.requests[0].path, "/projects/1");
}

#[test]
fn test_union_plan_uses_every_route() {
    let plan = plan("gitlab_my_issue", &["state = Closed"]).unwrap();
    let requests: Vec<_> = plan
        .requests
        .iter()
        .map(|r| (r.path.as_str(), r.params.get("scope").cloned(), r.params.get("state").cloned()))
        .collect();
    assert_eq!(
        requests,
        vec![
            ("/issues", Some("created_by_me".into()), Some("closed".into())),
            ("/issues", Some("assigned_to_me".into()), Some("closed".into())),
        ]
    );
}
