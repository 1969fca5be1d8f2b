//! Tests for the table catalog

use super::*;
use crate::filter::KeyFilter;
use crate::projection::Source;
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use test_case::test_case;

#[test]
fn test_table_names_are_unique_and_prefixed() {
    let names = table_names();
    let unique: HashSet<_> = names.iter().collect();
    assert_eq!(unique.len(), names.len());
    assert!(names.iter().all(|n| n.starts_with(TABLE_PREFIX)));
    assert_eq!(names.len(), 22);
}

#[test]
fn test_lookup_with_and_without_prefix() {
    assert_eq!(table("gitlab_commit").unwrap().name, "gitlab_commit");
    assert_eq!(table("commit").unwrap().name, "gitlab_commit");
    assert_eq!(table(" GITLAB_Issue ").unwrap().name, "gitlab_issue");
    assert!(is_table("my_issue"));

    let err = table("gitlab_wiki").unwrap_err();
    assert!(matches!(err, Error::UnknownTable { ref table } if table == "gitlab_wiki"));
}

#[test]
fn test_every_table_is_well_formed() {
    for def in catalog() {
        assert!(!def.routes.is_empty(), "{} has no route", def.name);
        assert!(def.page_size > 0, "{} has no page size", def.name);

        let mut columns = HashSet::new();
        for column in &def.columns {
            assert!(columns.insert(column.name), "{}.{} twice", def.name, column.name);
        }

        for key in def.scoping_keys() {
            assert!(def.column(key).is_some(), "{} cannot bind {key}", def.name);
        }
        for key in &def.keys {
            assert!(def.column(key.column).is_some(), "{} filters {}", def.name, key.column);
        }
        for column in &def.columns {
            if let Source::Qual(qual) = column.source {
                assert!(def.column(qual).is_some(), "{} fills from {qual}", def.name);
            }
        }
    }
}

#[test]
fn test_route_placeholders() {
    let route = Route::list("/projects/{project_id}/repository/commits");
    assert_eq!(route.placeholders(), vec!["project_id"]);
    assert!(!route.is_unscoped());

    let route = Route::list("/groups/{group_id}/projects/{id}");
    assert_eq!(route.placeholders(), vec!["group_id", "id"]);

    let route = Route::list("/projects").deny_on_public().with_param("scope", "all");
    assert!(route.placeholders().is_empty());
    assert!(route.is_unscoped());
    assert!(route.deny_on_public);
    assert_eq!(route.fixed, vec![("scope", "all")]);
}

#[test_case("gitlab_commit", 50)]
#[test_case("gitlab_pipeline", 50)]
#[test_case("gitlab_issue", DEFAULT_PAGE_SIZE)]
#[test_case("gitlab_project", DEFAULT_PAGE_SIZE)]
fn test_page_sizes(name: &str, expected: u32) {
    assert_eq!(table(name).unwrap().page_size, expected);
}

#[test]
fn test_required_keys() {
    assert_eq!(table("gitlab_commit").unwrap().required_keys(), vec!["project_id"]);
    assert_eq!(
        table("gitlab_group_member").unwrap().required_keys(),
        vec!["group_id"]
    );
    assert!(table("gitlab_issue").unwrap().required_keys().is_empty());
    assert!(table("gitlab_version").unwrap().required_keys().is_empty());
}

#[test]
fn test_my_issue_is_a_union() {
    let def = table("gitlab_my_issue").unwrap();
    assert_eq!(def.plan, PlanKind::Union);
    let scopes: Vec<_> = def.routes.iter().map(|r| r.fixed.clone()).collect();
    assert_eq!(
        scopes,
        vec![
            vec![("scope", "created_by_me")],
            vec![("scope", "assigned_to_me")]
        ]
    );
}

#[test]
fn test_event_range_uses_dates() {
    let def = table("gitlab_event").unwrap();
    assert!(matches!(
        def.key("created_at"),
        Some(KeyFilter::Range {
            after: "after",
            before: "before",
            ..
        })
    ));
    assert!(matches!(def.key("action"), Some(KeyFilter::Enum("action"))));
    assert!(def.key("target_title").is_none());
}
