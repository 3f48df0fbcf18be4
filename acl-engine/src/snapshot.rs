//! # Snapshot
//!
//! The two-tier structure every query runs against: roles grouped under the
//! permission node they are attached to, plus the free-standing roles.
//!
//! Every accessor here is total. A missing group, role or permission resolves
//! to an empty value (or `None` where the caller must tell "absent" apart from
//! "empty"), so a partial snapshot denies instead of failing.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// A stored permission path, e.g. `panel-admin->module-users->users->create`.
pub type PermissionPath = String;

/// Roles keyed by role key, in snapshot order.
pub type RoleMap = IndexMap<String, RoleEntry>;

/// Role groups keyed by permission-role key, in snapshot order.
pub type PermissionRoleMap = IndexMap<String, RoleMap>;

/// Errors raised while decoding or encoding a snapshot.
///
/// Queries never fail; only the JSON boundary does.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The payload is not a valid snapshot document
    #[error("Invalid snapshot document: {0}")]
    Json(#[from] serde_json::Error),
}

/// The permissions granted to one role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    /// Granted permission paths, duplicate-free and in insertion order.
    #[serde(default)]
    pub permissions: IndexSet<PermissionPath>,
}

impl RoleEntry {
    /// Create an entry with no permissions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entry from permission paths; duplicates are dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use acl_engine::RoleEntry;
    ///
    /// let entry = RoleEntry::from_permissions(["p1", "p2", "p1"]);
    /// assert_eq!(entry.permissions().len(), 2);
    /// ```
    pub fn from_permissions<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    /// The granted permission paths.
    pub fn permissions(&self) -> &IndexSet<PermissionPath> {
        &self.permissions
    }

    /// Check whether this entry grants exactly `permission`.
    pub fn grants(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Check if no permission is granted.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

/// Immutable two-tier view of roles and their permissions.
///
/// Serializes to the shape produced by snapshot builders:
///
/// ```text
/// {
///   "permission-roles": { "panel-admin": { "admin": { "permissions": [...] } } },
///   "roles":            { "support":     { "permissions": [...] } }
/// }
/// ```
///
/// # Example
///
/// ```
/// use acl_engine::Snapshot;
///
/// let snapshot = Snapshot::new()
///     .with_permission_role("panel-admin", "admin", ["panel-admin->module-users->users->create"])
///     .with_role("support", ["panel-admin->module-support->tickets->create"]);
///
/// assert!(snapshot.role_entry("support").is_some());
/// assert!(snapshot.permission_role_group("panel-user").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Roles attached to a permission node, grouped by that node's key.
    #[serde(rename = "permission-roles", default)]
    pub permission_roles: PermissionRoleMap,

    /// Free-standing roles.
    #[serde(default)]
    pub roles: RoleMap,
}

fn empty_role_map() -> &'static RoleMap {
    static EMPTY: OnceLock<RoleMap> = OnceLock::new();
    EMPTY.get_or_init(RoleMap::new)
}

fn empty_role_entry() -> &'static RoleEntry {
    static EMPTY: OnceLock<RoleEntry> = OnceLock::new();
    EMPTY.get_or_init(RoleEntry::new)
}

/// The permissions of a possibly absent entry; empty when absent.
pub fn permissions_of(entry: Option<&RoleEntry>) -> &IndexSet<PermissionPath> {
    entry.unwrap_or_else(|| empty_role_entry()).permissions()
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a snapshot from JSON. Missing sections default to empty.
    ///
    /// # Example
    ///
    /// ```
    /// use acl_engine::Snapshot;
    ///
    /// let snapshot = Snapshot::from_json(r#"{"roles": {"admin": {"permissions": ["p1"]}}}"#).unwrap();
    /// assert!(snapshot.root_permission_roles().is_empty());
    /// assert!(snapshot.role_entry("admin").unwrap().grants("p1"));
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode this snapshot as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Add permissions to a free-standing role, creating it if needed.
    pub fn with_role<I, S>(mut self, role: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_role(role, permissions);
        self
    }

    /// Add permissions to a role under a permission-role group, creating both if needed.
    pub fn with_permission_role<I, S>(
        mut self,
        permission_role: impl Into<String>,
        role: impl Into<String>,
        permissions: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_permission_role(permission_role, role, permissions);
        self
    }

    /// In-place form of [`Snapshot::with_role`].
    pub fn insert_role<I, S>(&mut self, role: impl Into<String>, permissions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles
            .entry(role.into())
            .or_default()
            .permissions
            .extend(permissions.into_iter().map(Into::into));
    }

    /// In-place form of [`Snapshot::with_permission_role`].
    pub fn insert_permission_role<I, S>(
        &mut self,
        permission_role: impl Into<String>,
        role: impl Into<String>,
        permissions: I,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permission_roles
            .entry(permission_role.into())
            .or_default()
            .entry(role.into())
            .or_default()
            .permissions
            .extend(permissions.into_iter().map(Into::into));
    }

    /// Check if both scopes are empty.
    pub fn is_empty(&self) -> bool {
        self.permission_roles.is_empty() && self.roles.is_empty()
    }

    /// All permission-role groups.
    pub fn root_permission_roles(&self) -> &PermissionRoleMap {
        &self.permission_roles
    }

    /// All free-standing roles.
    pub fn root_roles(&self) -> &RoleMap {
        &self.roles
    }

    /// The roles attached under `permission_role`, or an empty map.
    pub fn permission_role_group(&self, permission_role: &str) -> &RoleMap {
        self.permission_roles
            .get(permission_role)
            .unwrap_or_else(|| empty_role_map())
    }

    /// The entry of `role` under `permission_role`, or an empty entry if
    /// either level is missing.
    pub fn role_entry_in_group(&self, role: &str, permission_role: &str) -> &RoleEntry {
        self.permission_role_group(permission_role)
            .get(role)
            .unwrap_or_else(|| empty_role_entry())
    }

    /// The free-standing entry of `role`.
    ///
    /// Returns `None` when the role does not exist, which is distinct from a
    /// role that exists with no permissions.
    pub fn role_entry(&self, role: &str) -> Option<&RoleEntry> {
        self.roles.get(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{PERMISSIONS_KEY, PERMISSION_ROLES_KEY, ROLES_KEY};

    fn sample() -> Snapshot {
        Snapshot::new()
            .with_permission_role("panel-admin", "admin", ["x", "y"])
            .with_role("support", ["panel-admin->module-support->tickets->create"])
            .with_role("empty", Vec::<String>::new())
    }

    #[test]
    fn test_missing_group_is_empty() {
        let snapshot = sample();
        assert!(snapshot.permission_role_group("panel-user").is_empty());
        assert_eq!(snapshot.permission_role_group("panel-admin").len(), 1);
    }

    #[test]
    fn test_role_entry_in_group_missing_levels() {
        let snapshot = sample();
        assert!(snapshot.role_entry_in_group("admin", "panel-user").is_empty());
        assert!(snapshot.role_entry_in_group("ghost", "panel-admin").is_empty());
        assert!(snapshot.role_entry_in_group("admin", "panel-admin").grants("y"));
    }

    #[test]
    fn test_absent_role_differs_from_empty_role() {
        let snapshot = sample();
        assert!(snapshot.role_entry("ghost").is_none());

        let empty = snapshot.role_entry("empty").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_permissions_of_absent_entry() {
        let snapshot = sample();
        assert!(permissions_of(snapshot.role_entry("ghost")).is_empty());
        assert_eq!(permissions_of(snapshot.role_entry("support")).len(), 1);
    }

    #[test]
    fn test_role_entry_deduplicates_and_keeps_order() {
        let entry = RoleEntry::from_permissions(["b", "a", "b", "c"]);
        let order: Vec<&str> = entry.permissions().iter().map(String::as_str).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_insert_merges_into_existing_role() {
        let mut snapshot = Snapshot::new().with_role("admin", ["p1"]);
        snapshot.insert_role("admin", ["p2", "p1"]);
        assert_eq!(snapshot.role_entry("admin").unwrap().permissions().len(), 2);
    }

    #[test]
    fn test_json_uses_key_conventions() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value.get(PERMISSION_ROLES_KEY).is_some());
        assert!(value.get(ROLES_KEY).is_some());
        assert!(value[ROLES_KEY]["support"].get(PERMISSIONS_KEY).is_some());
    }

    #[test]
    fn test_json_missing_sections_default_to_empty() {
        let snapshot = Snapshot::from_json("{}").unwrap();
        assert!(snapshot.is_empty());

        let snapshot = Snapshot::from_json(r#"{"roles": {"admin": {}}}"#).unwrap();
        assert!(snapshot.role_entry("admin").unwrap().is_empty());
    }

    #[test]
    fn test_json_round_trip_preserves_snapshot() {
        let snapshot = sample();
        let decoded = Snapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = Snapshot::from_json("not json").unwrap_err();
        assert!(err.to_string().starts_with("Invalid snapshot document"));
    }
}
