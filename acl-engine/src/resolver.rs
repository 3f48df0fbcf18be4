//! # Resolver
//!
//! Snapshot-rooted entry points for every membership, aggregate and search
//! query. Each method fetches the relevant root map and delegates to the
//! explicit-map function in [`membership`](crate::membership) or
//! [`search`](crate::search).

use indexmap::IndexSet;

use crate::membership;
use crate::search;
use crate::snapshot::Snapshot;

/// A borrowed, read-only query view over one [`Snapshot`].
///
/// The resolver holds no state of its own: asking the same question twice
/// against the same snapshot always gives the same answer, and any number of
/// resolvers may share a snapshot across threads.
///
/// # Example
///
/// ```
/// use acl_engine::{PermissionResolver, Snapshot};
///
/// let snapshot = Snapshot::new()
///     .with_permission_role("panel-admin", "admin", ["x"])
///     .with_role("admin", ["p1", "p2"]);
/// let resolver = PermissionResolver::new(&snapshot);
///
/// assert!(resolver.has_root_role("admin"));
/// assert!(resolver.has_permission_in_role("admin", "p2"));
/// assert!(!resolver.has_permission_in_role("admin", "p3"));
/// assert!(resolver.has_role_under("admin", "panel-admin"));
/// assert!(!resolver.has_role_under("admin", "panel-user"));
/// assert!(resolver.search_in_role_under("panel-admin", "admin", "x"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PermissionResolver<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> PermissionResolver<'a> {
    /// Create a resolver over `snapshot`.
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self { snapshot }
    }

    /// The snapshot being queried.
    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    /// Every permission reachable in either scope, duplicates removed.
    ///
    /// The permission-role scope is walked first, then the free-standing roles.
    pub fn all_permissions(&self) -> IndexSet<&'a str> {
        let mut permissions = self.all_permissions_in_permission_role_scope();
        permissions.extend(self.all_permissions_in_role_scope());
        permissions
    }

    /// Every permission granted in the permission-role scope.
    pub fn all_permissions_in_permission_role_scope(&self) -> IndexSet<&'a str> {
        membership::collect_permission_role_scope(self.snapshot.root_permission_roles())
    }

    /// Every permission granted to a free-standing role.
    pub fn all_permissions_in_role_scope(&self) -> IndexSet<&'a str> {
        membership::collect_role_scope(self.snapshot.root_roles())
    }

    /// Check whether the permission-role group exists.
    pub fn has_permission_role(&self, permission_role: &str) -> bool {
        membership::has_permission_role(self.snapshot.root_permission_roles(), permission_role)
    }

    /// Check whether `role` exists under `permission_role`.
    pub fn has_role_under(&self, role: &str, permission_role: &str) -> bool {
        membership::has_role_under(self.snapshot.root_permission_roles(), role, permission_role)
    }

    /// Check whether the free-standing role exists.
    pub fn has_root_role(&self, role: &str) -> bool {
        membership::has_role(self.snapshot.root_roles(), role)
    }

    /// Check whether `role` under `permission_role` is granted `permission`.
    pub fn has_permission_in_role_under(&self, permission_role: &str, role: &str, permission: &str) -> bool {
        let granted = membership::has_permission_in_role_under(
            self.snapshot.root_permission_roles(),
            permission_role,
            role,
            permission,
        );
        if !granted {
            tracing::trace!(permission_role, role, permission, "scoped permission check denied");
        }
        granted
    }

    /// Check whether the free-standing `role` is granted `permission`.
    pub fn has_permission_in_role(&self, role: &str, permission: &str) -> bool {
        let granted = membership::has_permission_in_role(self.snapshot.root_roles(), role, permission);
        if !granted {
            tracing::trace!(role, permission, "root permission check denied");
        }
        granted
    }

    /// Check whether `permission` is granted anywhere, regardless of role.
    pub fn has_permission(&self, permission: &str) -> bool {
        membership::has_permission(&self.all_permissions(), permission)
    }

    /// Check that every role exists under `permission_role`.
    pub fn has_all_roles_under<I>(&self, permission_role: &str, roles: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        membership::has_all_roles_under(self.snapshot.root_permission_roles(), permission_role, roles)
    }

    /// Check that at least one role exists under `permission_role`.
    pub fn has_any_role_under<I>(&self, permission_role: &str, roles: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        membership::has_any_role_under(self.snapshot.root_permission_roles(), permission_role, roles)
    }

    /// Check that every role exists as a free-standing role.
    pub fn has_all_root_roles<I>(&self, roles: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        membership::has_all_roles(self.snapshot.root_roles(), roles)
    }

    /// Check that at least one role exists as a free-standing role.
    pub fn has_any_root_role<I>(&self, roles: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        membership::has_any_role(self.snapshot.root_roles(), roles)
    }

    /// Check that `role` under `permission_role` holds every permission.
    pub fn has_all_permissions_in_role_under<I>(&self, permission_role: &str, role: &str, permissions: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        membership::has_all_permissions_in_role_under(
            self.snapshot.root_permission_roles(),
            permission_role,
            role,
            permissions,
        )
    }

    /// Check that `role` under `permission_role` holds at least one permission.
    pub fn has_any_permission_in_role_under<I>(&self, permission_role: &str, role: &str, permissions: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        membership::has_any_permission_in_role_under(
            self.snapshot.root_permission_roles(),
            permission_role,
            role,
            permissions,
        )
    }

    /// Check that the free-standing `role` holds every permission.
    pub fn has_all_permissions_in_role<I>(&self, role: &str, permissions: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        membership::has_all_permissions_in_role(self.snapshot.root_roles(), role, permissions)
    }

    /// Check that the free-standing `role` holds at least one permission.
    pub fn has_any_permission_in_role<I>(&self, role: &str, permissions: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        membership::has_any_permission_in_role(self.snapshot.root_roles(), role, permissions)
    }

    /// Check that every permission is granted somewhere.
    ///
    /// The global permission set is collected once for the whole call.
    pub fn has_all_permissions<I>(&self, permissions: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        membership::has_all_permissions(&self.all_permissions(), permissions)
    }

    /// Check that at least one permission is granted somewhere.
    pub fn has_any_permission<I>(&self, permissions: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        membership::has_any_permission(&self.all_permissions(), permissions)
    }

    /// Substring search across both scopes.
    pub fn search(&self, query: &str) -> bool {
        search::matches_any(self.all_permissions(), query)
    }

    /// Substring search across the permission-role scope.
    pub fn search_in_permission_role_scope(&self, query: &str) -> bool {
        search::search_in_permission_role_scope(self.snapshot.root_permission_roles(), query)
    }

    /// Substring search across the free-standing roles.
    pub fn search_in_role_scope(&self, query: &str) -> bool {
        search::search_in_role_scope(self.snapshot.root_roles(), query)
    }

    /// Substring search within one free-standing role.
    pub fn search_in_root_role(&self, role: &str, query: &str) -> bool {
        search::search_in_role(self.snapshot.root_roles(), role, query)
    }

    /// Substring search within one role under `permission_role`.
    pub fn search_in_role_under(&self, permission_role: &str, role: &str, query: &str) -> bool {
        search::search_in_role_under(self.snapshot.root_permission_roles(), permission_role, role, query)
    }
}

impl<'a> From<&'a Snapshot> for PermissionResolver<'a> {
    fn from(snapshot: &'a Snapshot) -> Self {
        Self::new(snapshot)
    }
}
