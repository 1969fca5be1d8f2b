//! User tables

use super::types::{Route, TableDef};
use crate::filter::KeyColumn;
use crate::projection::{Column, Transform};

pub(super) fn user() -> TableDef {
    TableDef::new("gitlab_user", "Users of the GitLab instance")
        .columns(vec![
            Column::int("id", "User ID"),
            Column::text("username", "Username"),
            Column::text("name", "Display name"),
            Column::text("state", "Account state (active, blocked, ...)"),
            Column::bool("locked", "Whether the account is locked"),
            Column::text("web_url", "Profile URL"),
            Column::text("avatar_url", "Avatar URL").null_if_zero(),
            Column::timestamp("created_at", "When the account was created"),
            Column::bool("is_admin", "Whether the user is an administrator"),
            Column::bool("bot", "Whether the account is a bot"),
            Column::text("bio", "Biography").null_if_zero(),
            Column::text("location", "Location").null_if_zero(),
            Column::text("public_email", "Public email address").null_if_zero(),
            Column::text("email", "Primary email (administrators only)").null_if_zero(),
            Column::text("skype", "Skype handle").null_if_zero(),
            Column::text("linkedin", "LinkedIn handle").null_if_zero(),
            Column::text("twitter", "Twitter handle").null_if_zero(),
            Column::text("website_url", "Website").null_if_zero(),
            Column::text("organization", "Organization").null_if_zero(),
            Column::text("job_title", "Job title").null_if_zero(),
            Column::bool("external", "Whether the user is external"),
            Column::bool("private_profile", "Whether the profile is private"),
            Column::timestamp("last_sign_in_at", "Last sign-in time"),
            Column::timestamp("confirmed_at", "When the email was confirmed"),
            Column::timestamp("last_activity_on", "Day of the last activity")
                .transform(Transform::DateOnly),
            Column::timestamp("current_sign_in_at", "Current sign-in time"),
            Column::int("theme_id", "UI theme").null_if_zero(),
            Column::int("color_scheme_id", "Syntax color scheme").null_if_zero(),
            Column::int("projects_limit", "Maximum number of personal projects"),
            Column::bool("can_create_group", "Whether the user can create groups"),
            Column::bool("can_create_project", "Whether the user can create projects"),
            Column::bool("two_factor_enabled", "Whether 2FA is enabled"),
            Column::json("identities", "External identities"),
        ])
        .keys(vec![
            KeyColumn::param("username", "username"),
            KeyColumn::param("external", "external"),
            KeyColumn::enumerated("state", "state"),
            KeyColumn::range("created_at", "created_after", "created_before"),
        ])
        .route(Route::single("/users/{id}"))
        .route(Route::list("/users").deny_on_public())
        .scope_hint(
            "listing every user of gitlab.com is not supported; \
             filter on id = <user id> or use a self-managed instance",
        )
}
