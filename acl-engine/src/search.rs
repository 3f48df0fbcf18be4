//! # Search
//!
//! Literal substring search over permission paths.
//!
//! Matching is plain, case-sensitive substring containment: no patterns, no
//! normalization, and the first hit ends the scan. `module-support` finds
//! `panel-admin->module-support->tickets->create`.

use crate::membership::{collect_permission_role_scope, collect_role_scope};
use crate::snapshot::{PermissionRoleMap, RoleMap};

/// Check whether `query` occurs in any of `paths`.
pub fn matches_any<I>(paths: I, query: &str) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    paths.into_iter().any(|path| path.as_ref().contains(query))
}

/// Search both scopes.
pub fn search(permission_roles: &PermissionRoleMap, roles: &RoleMap, query: &str) -> bool {
    search_in_permission_role_scope(permission_roles, query) || search_in_role_scope(roles, query)
}

/// Search every permission granted in the permission-role scope.
pub fn search_in_permission_role_scope(permission_roles: &PermissionRoleMap, query: &str) -> bool {
    matches_any(collect_permission_role_scope(permission_roles), query)
}

/// Search every permission granted to a free-standing role.
pub fn search_in_role_scope(roles: &RoleMap, query: &str) -> bool {
    matches_any(collect_role_scope(roles), query)
}

/// Search the permissions of one role in `roles`; `false` if the role is absent.
pub fn search_in_role(roles: &RoleMap, role: &str, query: &str) -> bool {
    match roles.get(role) {
        Some(entry) => matches_any(&entry.permissions, query),
        None => false,
    }
}

/// Search the permissions of `role` under `permission_role`; `false` if
/// either key is absent.
pub fn search_in_role_under(
    permission_roles: &PermissionRoleMap,
    permission_role: &str,
    role: &str,
    query: &str,
) -> bool {
    match permission_roles.get(permission_role) {
        Some(group) => search_in_role(group, role, query),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;

    fn snapshot() -> Snapshot {
        Snapshot::new()
            .with_permission_role("panel-admin", "admin", ["panel-admin->module-users->users->create"])
            .with_role("support", ["panel-admin->module-support->tickets->create"])
    }

    #[test]
    fn test_substring_not_whole_token() {
        let snapshot = snapshot();
        assert!(search(&snapshot.permission_roles, &snapshot.roles, "module-support"));
        assert!(search(&snapshot.permission_roles, &snapshot.roles, "ers->cre"));
    }

    #[test]
    fn test_case_sensitive() {
        let snapshot = snapshot();
        assert!(!search(&snapshot.permission_roles, &snapshot.roles, "Module-Support"));
    }

    #[test]
    fn test_not_a_pattern() {
        let snapshot = snapshot();
        assert!(!search(&snapshot.permission_roles, &snapshot.roles, "module-.*"));
        assert!(!search(&snapshot.permission_roles, &snapshot.roles, "^panel"));
    }

    #[test]
    fn test_scope_restriction() {
        let snapshot = snapshot();
        assert!(search_in_role_scope(&snapshot.roles, "tickets"));
        assert!(!search_in_role_scope(&snapshot.roles, "module-users"));
        assert!(search_in_permission_role_scope(&snapshot.permission_roles, "module-users"));
        assert!(!search_in_permission_role_scope(&snapshot.permission_roles, "tickets"));
    }

    #[test]
    fn test_search_in_role_requires_role() {
        let snapshot = snapshot();
        assert!(search_in_role(&snapshot.roles, "support", "tickets"));
        assert!(!search_in_role(&snapshot.roles, "ghost", ""));
    }

    #[test]
    fn test_search_in_role_under_requires_both_keys() {
        let snapshot = snapshot();
        let map = &snapshot.permission_roles;
        assert!(search_in_role_under(map, "panel-admin", "admin", "users"));
        assert!(!search_in_role_under(map, "panel-user", "admin", "users"));
        assert!(!search_in_role_under(map, "panel-admin", "support", "users"));
    }

    #[test]
    fn test_empty_query_matches_any_existing_path() {
        let snapshot = snapshot();
        assert!(search_in_role(&snapshot.roles, "support", ""));
        assert!(!search(&Snapshot::new().permission_roles, &Snapshot::new().roles, ""));
    }
}
