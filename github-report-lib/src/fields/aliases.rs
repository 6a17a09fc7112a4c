//! Short names for repository fields that are nested or have unwieldy names.

use super::FieldPath;

static ALIASES: &[(&str, &str)] = &[
    ("owner", "owner__login"),
    ("forks", "forks_count"),
    ("stars", "stargazers_count"),
    ("watchers", "watchers_count"),
    ("subscribers", "subscribers_count"),
    ("open_issues", "open_issues_count"),
    ("pushed", "pushed_at"),
    ("created", "created_at"),
    ("updated", "updated_at"),
];

/// The canonical path text an alias stands for.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static str> {
    ALIASES.iter().find(|(alias, _)| *alias == name).map(|(_, target)| *target)
}

/// The alias target parsed as a path.
#[must_use]
pub fn expand(name: &str) -> Option<FieldPath> {
    lookup(name).map(FieldPath::from_static)
}

/// The name humanizers are registered under: the alias target when `field` is an alias, else `field` itself.
#[must_use]
pub fn canonical_name(field: &str) -> &str {
    lookup(field).unwrap_or(field)
}
