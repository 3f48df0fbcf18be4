//! Snapshot building
//!
//! This module turns registry records into the two-tier snapshot the
//! acl-engine resolver queries.
//!
//! # Layout
//!
//! ```text
//! Role attached to node N   → permission-roles[N.ability][role.slug]
//! Free-standing role        → roles[role.slug]
//! Granted permission node P → P.ability, in grant order
//! ```

use std::collections::HashMap;
use uuid::Uuid;

use acl_engine::{SharedSnapshot, Snapshot};

use crate::error::AclResult;
use crate::permission::PermissionNode;
use crate::repository::{AclRecords, AclRepository};

/// Builds engine snapshots from registry records.
///
/// # Examples
///
/// ```
/// use acl_registry::{AclRecords, SnapshotBuilder};
///
/// let snapshot = SnapshotBuilder::new().only_active(true).build(&AclRecords::default());
/// assert!(snapshot.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotBuilder {
    only_active: bool,
}

impl SnapshotBuilder {
    /// Create a builder that includes every role and permission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip inactive roles, inactive granted permissions, and roles attached
    /// to an inactive permission node.
    pub fn only_active(mut self, only_active: bool) -> Self {
        self.only_active = only_active;
        self
    }

    fn includes(&self, active: bool) -> bool {
        !self.only_active || active
    }

    /// Build a snapshot from a set of records.
    ///
    /// Pure: the same records always produce the same snapshot.
    pub fn build(&self, records: &AclRecords) -> Snapshot {
        let nodes: HashMap<Uuid, &PermissionNode> =
            records.permissions.iter().map(|p| (p.code, p)).collect();

        let mut snapshot = Snapshot::new();

        for role in records.roles.iter().filter(|r| self.includes(r.is_active())) {
            let granted: Vec<&str> = records
                .role_permissions
                .iter()
                .filter(|link| link.role_code == role.code)
                .filter_map(|link| nodes.get(&link.permission_code))
                .filter(|node| self.includes(node.is_active()))
                .map(|node| node.ability.as_str())
                .collect();

            match role.permission_code {
                None => snapshot.insert_role(role.slug.as_str(), granted),
                Some(code) => match nodes.get(&code) {
                    Some(parent) if self.includes(parent.is_active()) => {
                        snapshot.insert_permission_role(parent.ability.as_str(), role.slug.as_str(), granted)
                    }
                    Some(_) => {}
                    None => {
                        tracing::warn!(role = %role.code, permission = %code, "Role attached to a missing permission");
                    }
                },
            }
        }

        snapshot
    }

    /// Read every record from `repository` and build a snapshot.
    pub async fn build_from<R>(&self, repository: &R) -> AclResult<Snapshot>
    where
        R: AclRepository + ?Sized,
    {
        let records = repository.records().await?;
        Ok(self.build(&records))
    }

    /// Build from `repository` and publish the result to `shared`.
    ///
    /// # Returns
    ///
    /// The version of the newly published snapshot
    pub async fn rebuild_into<R>(&self, repository: &R, shared: &SharedSnapshot) -> AclResult<u64>
    where
        R: AclRepository + ?Sized,
    {
        let snapshot = self.build_from(repository).await?;
        let groups = snapshot.permission_roles.len();
        let roles = snapshot.roles.len();

        let version = shared.replace(snapshot);

        tracing::debug!(version, groups, roles, "Rebuilt permission snapshot");
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::NewPermission;
    use crate::repository::MemoryAclRepository;
    use crate::role::NewRole;
    use crate::status::ActiveFlag;
    use acl_engine::PermissionResolver;

    const USERS_CREATE: &str = "panel-admin->module-users->users->create";
    const TICKETS_CREATE: &str = "panel-admin->module-support->tickets->create";

    /// panel-admin
    ///   ├─ module-users  → users → create
    ///   └─ module-support → tickets → create
    /// roles: admin (under panel-admin), support (free-standing)
    async fn seeded() -> (MemoryAclRepository, Uuid, Uuid) {
        let repo = MemoryAclRepository::new();
        let panel = repo.create_permission(NewPermission::new("Panel Admin")).await.unwrap();

        let mut leaves = Vec::new();
        for (module, resource) in [("Module Users", "Users"), ("Module Support", "Tickets")] {
            let module = repo
                .create_permission(NewPermission::new(module).under(panel.code))
                .await
                .unwrap();
            let resource = repo
                .create_permission(NewPermission::new(resource).under(module.code))
                .await
                .unwrap();
            let create = repo
                .create_permission(NewPermission::new("Create").under(resource.code))
                .await
                .unwrap();
            leaves.push(create);
        }

        let admin = repo.create_role(NewRole::new("Admin").under(panel.code)).await.unwrap();
        let support = repo.create_role(NewRole::new("Support")).await.unwrap();
        repo.add_permission(admin.code, leaves[0].code).await.unwrap();
        repo.add_permission(support.code, leaves[1].code).await.unwrap();

        (repo, admin.code, support.code)
    }

    #[tokio::test]
    async fn test_build_places_roles_by_scope() {
        let (repo, _, _) = seeded().await;
        let snapshot = SnapshotBuilder::new().build_from(&repo).await.unwrap();

        assert!(snapshot
            .role_entry_in_group("admin", "panel-admin")
            .grants(USERS_CREATE));
        assert!(snapshot.role_entry("support").unwrap().grants(TICKETS_CREATE));
        assert!(snapshot.role_entry("admin").is_none());
    }

    #[tokio::test]
    async fn test_built_snapshot_answers_queries() {
        let (repo, _, _) = seeded().await;
        let snapshot = SnapshotBuilder::new().build_from(&repo).await.unwrap();
        let resolver = PermissionResolver::new(&snapshot);

        assert!(resolver.has_role_under("admin", "panel-admin"));
        assert!(!resolver.has_role_under("admin", "panel-user"));
        assert!(resolver.has_permission_in_role_under("panel-admin", "admin", USERS_CREATE));
        assert!(resolver.has_permission_in_role("support", TICKETS_CREATE));
        assert!(resolver.has_all_permissions([USERS_CREATE, TICKETS_CREATE]));
        assert!(resolver.search("module-support"));
        assert!(!resolver.search_in_permission_role_scope("module-support"));
    }

    #[tokio::test]
    async fn test_json_shape() {
        let (repo, _, _) = seeded().await;
        let snapshot = SnapshotBuilder::new().build_from(&repo).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "permission-roles": {
                    "panel-admin": { "admin": { "permissions": [USERS_CREATE] } }
                },
                "roles": {
                    "support": { "permissions": [TICKETS_CREATE] }
                }
            })
        );
    }

    #[tokio::test]
    async fn test_role_without_permissions_is_present_but_empty() {
        let (repo, _, _) = seeded().await;
        repo.create_role(NewRole::new("Guest")).await.unwrap();
        let snapshot = SnapshotBuilder::new().build_from(&repo).await.unwrap();

        assert!(snapshot.role_entry("guest").unwrap().is_empty());
        assert!(PermissionResolver::new(&snapshot).has_root_role("guest"));
    }

    #[tokio::test]
    async fn test_only_active_filters_roles_and_permissions() {
        let (repo, admin, support) = seeded().await;

        let mut role = repo.role(support).await.unwrap();
        role.active = ActiveFlag::No;
        repo.update_role(role).await.unwrap();

        let mut leaf = repo
            .find_permission_by_ability(USERS_CREATE)
            .await
            .unwrap()
            .unwrap();
        leaf.active = ActiveFlag::No;
        repo.update_permission(leaf).await.unwrap();

        let records = repo.records().await.unwrap();

        let everything = SnapshotBuilder::new().build(&records);
        assert!(everything.role_entry("support").is_some());
        assert!(everything.role_entry_in_group("admin", "panel-admin").grants(USERS_CREATE));

        let active = SnapshotBuilder::new().only_active(true).build(&records);
        assert!(active.role_entry("support").is_none());
        assert!(active.role_entry_in_group("admin", "panel-admin").is_empty());
        assert!(PermissionResolver::new(&active).has_role_under("admin", "panel-admin"));

        // Admin itself stayed active.
        assert!(repo.role(admin).await.unwrap().is_active());
    }

    #[tokio::test]
    async fn test_inactive_parent_hides_scoped_roles() {
        let (repo, _, _) = seeded().await;
        let mut panel = repo.find_permission_by_ability("panel-admin").await.unwrap().unwrap();
        panel.active = ActiveFlag::No;
        repo.update_permission(panel).await.unwrap();

        let snapshot = SnapshotBuilder::new().only_active(true).build_from(&repo).await.unwrap();
        assert!(snapshot.root_permission_roles().is_empty());
        assert!(snapshot.role_entry("support").is_some());
    }

    #[test]
    fn test_dangling_parent_is_skipped() {
        let records = AclRecords {
            permissions: Vec::new(),
            roles: vec![crate::role::Role {
                code: Uuid::now_v7(),
                name: "Admin".to_string(),
                slug: "admin".to_string(),
                description: None,
                active: ActiveFlag::Yes,
                permission_code: Some(Uuid::now_v7()),
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            }],
            role_permissions: Vec::new(),
        };

        assert!(SnapshotBuilder::new().build(&records).is_empty());
    }

    #[tokio::test]
    async fn test_rebuild_into_publishes_new_version() {
        let (repo, admin, _) = seeded().await;
        let shared = SharedSnapshot::default();
        let builder = SnapshotBuilder::new();

        assert_eq!(builder.rebuild_into(&repo, &shared).await.unwrap(), 1);
        let before = shared.load();

        let leaf = repo.find_permission_by_ability(USERS_CREATE).await.unwrap().unwrap();
        repo.remove_permission(admin, leaf.code).await.unwrap();
        assert_eq!(builder.rebuild_into(&repo, &shared).await.unwrap(), 2);

        assert!(PermissionResolver::new(&before).has_permission(USERS_CREATE));
        assert!(!shared.with_resolver(|r| r.has_permission(USERS_CREATE)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_rebuilds_report_distinct_versions() {
        let (repo, _, _) = seeded().await;
        let shared = std::sync::Arc::new(SharedSnapshot::default());

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let repo = repo.clone();
                let shared = std::sync::Arc::clone(&shared);
                tokio::spawn(async move { SnapshotBuilder::new().rebuild_into(&repo, &shared).await })
            })
            .collect();

        let mut versions = Vec::new();
        for task in tasks {
            versions.push(task.await.unwrap().unwrap());
        }
        versions.sort_unstable();

        assert_eq!(versions, (1..=16).collect::<Vec<u64>>());
        assert_eq!(shared.version(), 16);
    }

    #[tokio::test]
    async fn test_build_from_trait_object() {
        let (repo, _, _) = seeded().await;
        let dynamic: &dyn AclRepository = &repo;
        let snapshot = SnapshotBuilder::new().build_from(dynamic).await.unwrap();
        assert_eq!(snapshot.roles.len(), 1);
    }
}
