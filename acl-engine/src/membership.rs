//! # Membership
//!
//! Membership queries over explicit maps.
//!
//! Each function takes the map it should search, so callers already holding a
//! filtered map (for example a subset of permission-role groups) can query it
//! directly. [`PermissionResolver`](crate::PermissionResolver) wraps these with
//! the snapshot's root maps.
//!
//! Compound checks fail fast from the outside in: a missing permission-role
//! key or role key answers `false` before any inner lookup happens.

use indexmap::IndexSet;

use crate::aggregate::{all_of, any_of};
use crate::snapshot::{PermissionRoleMap, RoleMap};

/// Union of every permission granted in the permission-role scope.
///
/// Walks group → role → permissions in map order and drops duplicates.
pub fn collect_permission_role_scope(permission_roles: &PermissionRoleMap) -> IndexSet<&str> {
    permission_roles
        .values()
        .flat_map(|group| group.values())
        .flat_map(|entry| entry.permissions.iter().map(String::as_str))
        .collect()
}

/// Union of every permission granted to a free-standing role.
pub fn collect_role_scope(roles: &RoleMap) -> IndexSet<&str> {
    roles
        .values()
        .flat_map(|entry| entry.permissions.iter().map(String::as_str))
        .collect()
}

/// Check whether the permission-role group `permission_role` exists.
pub fn has_permission_role(permission_roles: &PermissionRoleMap, permission_role: &str) -> bool {
    permission_roles.contains_key(permission_role)
}

/// Check whether `role` exists in `roles`.
pub fn has_role(roles: &RoleMap, role: &str) -> bool {
    roles.contains_key(role)
}

/// Check whether `role` exists under the group `permission_role`.
pub fn has_role_under(permission_roles: &PermissionRoleMap, role: &str, permission_role: &str) -> bool {
    match permission_roles.get(permission_role) {
        Some(group) => has_role(group, role),
        None => false,
    }
}

/// Check whether `role` under `permission_role` is granted `permission`.
pub fn has_permission_in_role_under(
    permission_roles: &PermissionRoleMap,
    permission_role: &str,
    role: &str,
    permission: &str,
) -> bool {
    let Some(group) = permission_roles.get(permission_role) else {
        return false;
    };
    has_permission_in_role(group, role, permission)
}

/// Check whether the role `role` in `roles` is granted `permission`.
pub fn has_permission_in_role(roles: &RoleMap, role: &str, permission: &str) -> bool {
    match roles.get(role) {
        Some(entry) => entry.grants(permission),
        None => false,
    }
}

/// Check whether `permission` is in an already collected permission set.
pub fn has_permission(all_permissions: &IndexSet<&str>, permission: &str) -> bool {
    all_permissions.contains(permission)
}

/// Check that every role exists under `permission_role`. Empty input is `true`.
pub fn has_all_roles_under<I>(permission_roles: &PermissionRoleMap, permission_role: &str, roles: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    all_of(roles, |role| has_role_under(permission_roles, role.as_ref(), permission_role))
}

/// Check that at least one role exists under `permission_role`.
pub fn has_any_role_under<I>(permission_roles: &PermissionRoleMap, permission_role: &str, roles: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    any_of(roles, |role| has_role_under(permission_roles, role.as_ref(), permission_role))
}

/// Check that every role exists in `roles_in`. Empty input is `true`.
pub fn has_all_roles<I>(roles_in: &RoleMap, roles: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    all_of(roles, |role| has_role(roles_in, role.as_ref()))
}

/// Check that at least one role exists in `roles_in`.
pub fn has_any_role<I>(roles_in: &RoleMap, roles: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    any_of(roles, |role| has_role(roles_in, role.as_ref()))
}

/// Check that `role` under `permission_role` is granted every permission.
///
/// Empty input is `true`, even when the role does not exist.
pub fn has_all_permissions_in_role_under<I>(
    permission_roles: &PermissionRoleMap,
    permission_role: &str,
    role: &str,
    permissions: I,
) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    all_of(permissions, |permission| {
        has_permission_in_role_under(permission_roles, permission_role, role, permission.as_ref())
    })
}

/// Check that `role` under `permission_role` is granted at least one permission.
pub fn has_any_permission_in_role_under<I>(
    permission_roles: &PermissionRoleMap,
    permission_role: &str,
    role: &str,
    permissions: I,
) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    any_of(permissions, |permission| {
        has_permission_in_role_under(permission_roles, permission_role, role, permission.as_ref())
    })
}

/// Check that `role` in `roles` is granted every permission. Empty input is `true`.
pub fn has_all_permissions_in_role<I>(roles: &RoleMap, role: &str, permissions: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    all_of(permissions, |permission| has_permission_in_role(roles, role, permission.as_ref()))
}

/// Check that `role` in `roles` is granted at least one permission.
pub fn has_any_permission_in_role<I>(roles: &RoleMap, role: &str, permissions: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    any_of(permissions, |permission| has_permission_in_role(roles, role, permission.as_ref()))
}

/// Check that every permission is in `all_permissions`. Empty input is `true`.
pub fn has_all_permissions<I>(all_permissions: &IndexSet<&str>, permissions: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    all_of(permissions, |permission| has_permission(all_permissions, permission.as_ref()))
}

/// Check that at least one permission is in `all_permissions`.
pub fn has_any_permission<I>(all_permissions: &IndexSet<&str>, permissions: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    any_of(permissions, |permission| has_permission(all_permissions, permission.as_ref()))
}
