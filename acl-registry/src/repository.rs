//! Registry persistence
//!
//! This module provides the repository abstraction the permission tree and
//! role registry are stored behind, and an in-memory implementation.
//!
//! Every write validates the scoped uniqueness rules before touching storage:
//! - permission name and slug are unique among siblings
//! - permission ability is unique across the whole tree
//! - role name and slug are unique among roles attached to the same node

use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use acl_engine::keys::join_ability;

use crate::error::{AclError, AclResult};
use crate::permission::{NewPermission, PermissionNode};
use crate::role::{NewRole, Role, RolePermission};
use crate::settings::AclSettings;
use crate::slug::slugify;
use crate::status::ActiveFlag;

/// A consistent copy of every stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclRecords {
    /// Permission nodes, in creation order
    pub permissions: Vec<PermissionNode>,

    /// Roles, in creation order
    pub roles: Vec<Role>,

    /// Role-permission links, in creation order
    pub role_permissions: Vec<RolePermission>,
}

/// Storage for permission nodes, roles and their links.
///
/// Lookups that may legitimately find nothing return `Option`; lookups that
/// the caller expects to succeed return a "does not exist" error instead.
#[async_trait]
pub trait AclRepository: Send + Sync {
    /// Create a permission node.
    ///
    /// The slug defaults to the slugified name; the ability defaults to the
    /// parent's ability joined with the slug.
    ///
    /// # Errors
    ///
    /// - [`AclError::PermissionNotFound`] if the parent does not exist
    /// - [`AclError::PermissionNameExists`] / [`AclError::PermissionSlugExists`]
    ///   if a sibling already uses the name / slug
    /// - [`AclError::PermissionAbilityExists`] if any node already uses the ability
    async fn create_permission(&self, input: NewPermission) -> AclResult<PermissionNode>;

    /// Save changes to an existing node, re-validating uniqueness against
    /// every other node.
    ///
    /// The ability is stored as given; descendants keep their abilities.
    async fn update_permission(&self, node: PermissionNode) -> AclResult<PermissionNode>;

    /// Get a node by code.
    async fn permission(&self, code: Uuid) -> AclResult<PermissionNode>;

    /// Get a node by name under `parent_code` (`None` for root nodes).
    async fn permission_named(&self, name: &str, parent_code: Option<Uuid>) -> AclResult<PermissionNode> {
        self.find_permission_by_name(name, parent_code)
            .await?
            .ok_or_else(|| AclError::PermissionNamed(name.to_string()))
    }

    /// Find a node by name under `parent_code` (`None` for root nodes).
    async fn find_permission_by_name(&self, name: &str, parent_code: Option<Uuid>) -> AclResult<Option<PermissionNode>>;

    /// Find a node by slug under `parent_code` (`None` for root nodes).
    async fn find_permission_by_slug(&self, slug: &str, parent_code: Option<Uuid>) -> AclResult<Option<PermissionNode>>;

    /// Find a node by ability anywhere in the tree.
    async fn find_permission_by_ability(&self, ability: &str) -> AclResult<Option<PermissionNode>>;

    /// Root nodes, optionally restricted to one status.
    async fn root_permissions(&self, active: Option<ActiveFlag>) -> AclResult<Vec<PermissionNode>>;

    /// Direct children of a node.
    async fn child_permissions(&self, parent_code: Uuid) -> AclResult<Vec<PermissionNode>>;

    /// Create a role.
    ///
    /// # Errors
    ///
    /// - [`AclError::PermissionNotFound`] if the parent permission does not exist
    /// - [`AclError::RoleNameExists`] / [`AclError::RoleSlugExists`] if a role
    ///   under the same parent already uses the name / slug
    async fn create_role(&self, input: NewRole) -> AclResult<Role>;

    /// Save changes to an existing role, re-validating uniqueness against
    /// every other role.
    async fn update_role(&self, role: Role) -> AclResult<Role>;

    /// Get a role by code.
    async fn role(&self, code: Uuid) -> AclResult<Role>;

    /// Get a role by name under `permission_code` (`None` for free-standing roles).
    async fn role_named(&self, name: &str, permission_code: Option<Uuid>) -> AclResult<Role> {
        self.find_role_by_name(name, permission_code)
            .await?
            .ok_or_else(|| AclError::RoleNamed(name.to_string()))
    }

    /// Find a role by name under `permission_code`.
    async fn find_role_by_name(&self, name: &str, permission_code: Option<Uuid>) -> AclResult<Option<Role>>;

    /// Find a role by slug under `permission_code`.
    async fn find_role_by_slug(&self, slug: &str, permission_code: Option<Uuid>) -> AclResult<Option<Role>>;

    /// Free-standing roles, optionally restricted to one status.
    async fn root_roles(&self, active: Option<ActiveFlag>) -> AclResult<Vec<Role>>;

    /// Roles attached to a permission node.
    async fn roles_of_permission(&self, permission_code: Uuid) -> AclResult<Vec<Role>>;

    /// Grant a permission node to a role. Granting twice returns the existing link.
    async fn add_permission(&self, role_code: Uuid, permission_code: Uuid) -> AclResult<RolePermission>;

    /// Revoke a permission node from a role. Revoking a missing link succeeds.
    async fn remove_permission(&self, role_code: Uuid, permission_code: Uuid) -> AclResult<()>;

    /// Permission nodes granted to a role, in grant order.
    async fn permissions_of_role(&self, role_code: Uuid) -> AclResult<Vec<PermissionNode>>;

    /// Copy every record in one consistent read.
    async fn records(&self) -> AclResult<AclRecords>;
}

#[derive(Debug, Default)]
struct Tables {
    permissions: IndexMap<Uuid, PermissionNode>,
    roles: IndexMap<Uuid, Role>,
    links: Vec<RolePermission>,
}

impl Tables {
    fn permission(&self, code: Uuid) -> AclResult<&PermissionNode> {
        self.permissions.get(&code).ok_or(AclError::PermissionNotFound(code))
    }

    fn role(&self, code: Uuid) -> AclResult<&Role> {
        self.roles.get(&code).ok_or(AclError::RoleNotFound(code))
    }

    fn permission_with_name(&self, name: &str, parent: Option<Uuid>, except: Option<Uuid>) -> Option<&PermissionNode> {
        self.permissions
            .values()
            .find(|p| p.name == name && p.parent_code == parent && Some(p.code) != except)
    }

    fn permission_with_slug(&self, slug: &str, parent: Option<Uuid>, except: Option<Uuid>) -> Option<&PermissionNode> {
        self.permissions
            .values()
            .find(|p| p.slug == slug && p.parent_code == parent && Some(p.code) != except)
    }

    fn permission_with_ability(&self, ability: &str, except: Option<Uuid>) -> Option<&PermissionNode> {
        self.permissions
            .values()
            .find(|p| p.ability == ability && Some(p.code) != except)
    }

    fn role_with_name(&self, name: &str, parent: Option<Uuid>, except: Option<Uuid>) -> Option<&Role> {
        self.roles
            .values()
            .find(|r| r.name == name && r.permission_code == parent && Some(r.code) != except)
    }

    fn role_with_slug(&self, slug: &str, parent: Option<Uuid>, except: Option<Uuid>) -> Option<&Role> {
        self.roles
            .values()
            .find(|r| r.slug == slug && r.permission_code == parent && Some(r.code) != except)
    }

    /// Walks parent links from `candidate` looking for `ancestor`.
    fn descends_from(&self, candidate: Uuid, ancestor: Uuid) -> bool {
        let mut current = Some(candidate);
        // Bounded by the node count.
        for _ in 0..=self.permissions.len() {
            match current {
                Some(code) if code == ancestor => return true,
                Some(code) => current = self.permissions.get(&code).and_then(|p| p.parent_code),
                None => return false,
            }
        }
        false
    }
}

/// The given slug, or one derived from `name`; never empty.
fn derive_slug(slug: Option<String>, name: &str) -> AclResult<String> {
    let slug = match slug {
        Some(slug) if !slug.is_empty() => slug,
        _ => slugify(name),
    };
    if slug.is_empty() {
        return Err(AclError::InvalidSlug(name.to_string()));
    }
    Ok(slug)
}

/// In-memory repository.
///
/// Suitable for single-process applications and testing. Clones share the
/// same storage.
///
/// # Examples
///
/// ```
/// use acl_registry::{AclRepository, MemoryAclRepository, NewPermission};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let repo = MemoryAclRepository::new();
/// let panel = repo.create_permission(NewPermission::new("Panel Admin")).await.unwrap();
/// let users = repo
///     .create_permission(NewPermission::new("Module Users").under(panel.code))
///     .await
///     .unwrap();
///
/// assert_eq!(users.ability, "panel-admin->module-users");
/// # }
/// ```
#[derive(Clone, Default)]
pub struct MemoryAclRepository {
    settings: Arc<AclSettings>,
    tables: Arc<RwLock<Tables>>,
}

impl std::fmt::Debug for MemoryAclRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryAclRepository")
            .field("settings", &self.settings)
            .finish()
    }
}

impl MemoryAclRepository {
    /// Create an empty repository with default settings.
    pub fn new() -> Self {
        Self::with_settings(AclSettings::default())
    }

    /// Create an empty repository with custom settings.
    pub fn with_settings(settings: AclSettings) -> Self {
        Self {
            settings: Arc::new(settings),
            tables: Arc::new(RwLock::new(Tables::default())),
        }
    }

    /// The settings this repository creates records with.
    pub fn settings(&self) -> &AclSettings {
        &self.settings
    }
}

#[async_trait]
impl AclRepository for MemoryAclRepository {
    async fn create_permission(&self, input: NewPermission) -> AclResult<PermissionNode> {
        let mut tables = self.tables.write().await;

        let parent_ability = match input.parent_code {
            Some(parent) => Some(tables.permission(parent)?.ability.clone()),
            None => None,
        };

        if tables.permission_with_name(&input.name, input.parent_code, None).is_some() {
            return Err(AclError::PermissionNameExists(input.name));
        }

        let slug = derive_slug(input.slug, &input.name)?;
        if tables.permission_with_slug(&slug, input.parent_code, None).is_some() {
            return Err(AclError::PermissionSlugExists(slug));
        }

        let ability = input.ability.unwrap_or_else(|| {
            join_ability(parent_ability.as_deref(), &self.settings.ability_separator, &slug)
        });
        if tables.permission_with_ability(&ability, None).is_some() {
            return Err(AclError::PermissionAbilityExists(ability));
        }

        let now = Utc::now();
        let node = PermissionNode {
            code: Uuid::now_v7(),
            name: input.name,
            slug,
            ability,
            note: input.note,
            description: input.description,
            active: self.settings.permission_active_default,
            parent_code: input.parent_code,
            created_at: now,
            updated_at: now,
        };
        tables.permissions.insert(node.code, node.clone());

        tracing::debug!(code = %node.code, ability = %node.ability, "Created permission");
        Ok(node)
    }

    async fn update_permission(&self, node: PermissionNode) -> AclResult<PermissionNode> {
        let mut tables = self.tables.write().await;

        let created_at = tables.permission(node.code)?.created_at;

        if let Some(parent) = node.parent_code {
            tables.permission(parent)?;
            if tables.descends_from(parent, node.code) {
                return Err(AclError::InvalidParent(node.code));
            }
        }

        if tables
            .permission_with_name(&node.name, node.parent_code, Some(node.code))
            .is_some()
        {
            return Err(AclError::PermissionNameExists(node.name));
        }
        if node.slug.is_empty() {
            return Err(AclError::InvalidSlug(node.name));
        }
        if tables
            .permission_with_slug(&node.slug, node.parent_code, Some(node.code))
            .is_some()
        {
            return Err(AclError::PermissionSlugExists(node.slug));
        }
        if tables.permission_with_ability(&node.ability, Some(node.code)).is_some() {
            return Err(AclError::PermissionAbilityExists(node.ability));
        }

        let updated = PermissionNode {
            created_at,
            updated_at: Utc::now(),
            ..node
        };
        tables.permissions.insert(updated.code, updated.clone());

        tracing::debug!(code = %updated.code, ability = %updated.ability, "Updated permission");
        Ok(updated)
    }

    async fn permission(&self, code: Uuid) -> AclResult<PermissionNode> {
        self.tables.read().await.permission(code).cloned()
    }

    async fn find_permission_by_name(&self, name: &str, parent_code: Option<Uuid>) -> AclResult<Option<PermissionNode>> {
        Ok(self.tables.read().await.permission_with_name(name, parent_code, None).cloned())
    }

    async fn find_permission_by_slug(&self, slug: &str, parent_code: Option<Uuid>) -> AclResult<Option<PermissionNode>> {
        Ok(self.tables.read().await.permission_with_slug(slug, parent_code, None).cloned())
    }

    async fn find_permission_by_ability(&self, ability: &str) -> AclResult<Option<PermissionNode>> {
        Ok(self.tables.read().await.permission_with_ability(ability, None).cloned())
    }

    async fn root_permissions(&self, active: Option<ActiveFlag>) -> AclResult<Vec<PermissionNode>> {
        let tables = self.tables.read().await;
        Ok(tables
            .permissions
            .values()
            .filter(|p| p.is_root() && active.map_or(true, |flag| p.active == flag))
            .cloned()
            .collect())
    }

    async fn child_permissions(&self, parent_code: Uuid) -> AclResult<Vec<PermissionNode>> {
        let tables = self.tables.read().await;
        Ok(tables
            .permissions
            .values()
            .filter(|p| p.parent_code == Some(parent_code))
            .cloned()
            .collect())
    }

    async fn create_role(&self, input: NewRole) -> AclResult<Role> {
        let mut tables = self.tables.write().await;

        if let Some(parent) = input.permission_code {
            tables.permission(parent)?;
        }

        if tables.role_with_name(&input.name, input.permission_code, None).is_some() {
            return Err(AclError::RoleNameExists(input.name));
        }

        let slug = derive_slug(input.slug, &input.name)?;
        if tables.role_with_slug(&slug, input.permission_code, None).is_some() {
            return Err(AclError::RoleSlugExists(slug));
        }

        let now = Utc::now();
        let role = Role {
            code: Uuid::now_v7(),
            name: input.name,
            slug,
            description: input.description,
            active: self.settings.role_active_default,
            permission_code: input.permission_code,
            created_at: now,
            updated_at: now,
        };
        tables.roles.insert(role.code, role.clone());

        tracing::debug!(code = %role.code, slug = %role.slug, scoped = !role.is_root(), "Created role");
        Ok(role)
    }

    async fn update_role(&self, role: Role) -> AclResult<Role> {
        let mut tables = self.tables.write().await;

        let created_at = tables.role(role.code)?.created_at;

        if let Some(parent) = role.permission_code {
            tables.permission(parent)?;
        }

        if tables
            .role_with_name(&role.name, role.permission_code, Some(role.code))
            .is_some()
        {
            return Err(AclError::RoleNameExists(role.name));
        }
        if role.slug.is_empty() {
            return Err(AclError::InvalidSlug(role.name));
        }
        if tables
            .role_with_slug(&role.slug, role.permission_code, Some(role.code))
            .is_some()
        {
            return Err(AclError::RoleSlugExists(role.slug));
        }

        let updated = Role {
            created_at,
            updated_at: Utc::now(),
            ..role
        };
        tables.roles.insert(updated.code, updated.clone());

        tracing::debug!(code = %updated.code, slug = %updated.slug, "Updated role");
        Ok(updated)
    }

    async fn role(&self, code: Uuid) -> AclResult<Role> {
        self.tables.read().await.role(code).cloned()
    }

    async fn find_role_by_name(&self, name: &str, permission_code: Option<Uuid>) -> AclResult<Option<Role>> {
        Ok(self.tables.read().await.role_with_name(name, permission_code, None).cloned())
    }

    async fn find_role_by_slug(&self, slug: &str, permission_code: Option<Uuid>) -> AclResult<Option<Role>> {
        Ok(self.tables.read().await.role_with_slug(slug, permission_code, None).cloned())
    }

    async fn root_roles(&self, active: Option<ActiveFlag>) -> AclResult<Vec<Role>> {
        let tables = self.tables.read().await;
        Ok(tables
            .roles
            .values()
            .filter(|r| r.is_root() && active.map_or(true, |flag| r.active == flag))
            .cloned()
            .collect())
    }

    async fn roles_of_permission(&self, permission_code: Uuid) -> AclResult<Vec<Role>> {
        let tables = self.tables.read().await;
        Ok(tables
            .roles
            .values()
            .filter(|r| r.permission_code == Some(permission_code))
            .cloned()
            .collect())
    }

    async fn add_permission(&self, role_code: Uuid, permission_code: Uuid) -> AclResult<RolePermission> {
        let mut tables = self.tables.write().await;

        tables.role(role_code)?;
        tables.permission(permission_code)?;

        if let Some(existing) = tables.links.iter().find(|l| l.links(role_code, permission_code)) {
            return Ok(existing.clone());
        }

        let link = RolePermission::new(role_code, permission_code);
        tables.links.push(link.clone());

        tracing::debug!(role = %role_code, permission = %permission_code, "Granted permission to role");
        Ok(link)
    }

    async fn remove_permission(&self, role_code: Uuid, permission_code: Uuid) -> AclResult<()> {
        let mut tables = self.tables.write().await;

        let before = tables.links.len();
        tables.links.retain(|l| !l.links(role_code, permission_code));
        let removed = before != tables.links.len();

        tracing::debug!(role = %role_code, permission = %permission_code, removed, "Revoked permission from role");
        Ok(())
    }

    async fn permissions_of_role(&self, role_code: Uuid) -> AclResult<Vec<PermissionNode>> {
        let tables = self.tables.read().await;

        tables.role(role_code)?;

        Ok(tables
            .links
            .iter()
            .filter(|l| l.role_code == role_code)
            .filter_map(|l| tables.permissions.get(&l.permission_code))
            .cloned()
            .collect())
    }

    async fn records(&self) -> AclResult<AclRecords> {
        let tables = self.tables.read().await;
        Ok(AclRecords {
            permissions: tables.permissions.values().cloned().collect(),
            roles: tables.roles.values().cloned().collect(),
            role_permissions: tables.links.clone(),
        })
    }
}
