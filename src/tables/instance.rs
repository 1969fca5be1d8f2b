//! Instance-level tables

use super::types::{Route, TableDef};
use crate::projection::Column;

pub(super) fn version() -> TableDef {
    TableDef::new("gitlab_version", "Version of the GitLab instance")
        .columns(vec![
            Column::text("version", "GitLab version string"),
            Column::text("revision", "Git revision the instance was built from"),
            Column::bool("enterprise", "Whether the instance runs the enterprise edition"),
            Column::text("kas_version", "Version of the Kubernetes agent server").at("kas.version"),
            Column::bool("kas_enabled", "Whether the Kubernetes agent server is enabled")
                .at("kas.enabled"),
        ])
        .route(Route::single("/version"))
}

pub(super) fn setting() -> TableDef {
    TableDef::new(
        "gitlab_setting",
        "Application settings of the instance (administrators only)",
    )
    .columns(vec![
        Column::int("id", "Settings record ID"),
        Column::timestamp("created_at", "When the settings were created"),
        Column::timestamp("updated_at", "When the settings were last updated"),
        Column::text("default_branch_name", "Initial branch name for new repositories")
            .null_if_zero(),
        Column::text("default_project_visibility", "Default visibility of new projects"),
        Column::text("default_group_visibility", "Default visibility of new groups"),
        Column::text("default_snippet_visibility", "Default visibility of new snippets"),
        Column::bool("signup_enabled", "Whether sign-up is enabled"),
        Column::bool("password_authentication_enabled_for_web", "Web password sign-in"),
        Column::bool("require_two_factor_authentication", "Whether 2FA is enforced"),
        Column::int("two_factor_grace_period", "Hours before 2FA is enforced"),
        Column::int("max_attachment_size", "Maximum attachment size in MB"),
        Column::int("max_artifacts_size", "Maximum artifacts size in MB"),
        Column::int("default_projects_limit", "Default project limit per user"),
        Column::text("after_sign_up_text", "Text shown after sign-up").null_if_zero(),
        Column::text("home_page_url", "Redirect for signed-out users").null_if_zero(),
        Column::json("restricted_visibility_levels", "Visibility levels closed to non-admins"),
        Column::json("domain_allowlist", "Domains allowed to sign up"),
        Column::json("import_sources", "Enabled import sources"),
    ])
    .route(Route::single("/application/settings"))
}
