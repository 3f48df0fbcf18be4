//! Role domain models
//!
//! This module provides the Role entity and the RolePermission link between
//! roles and permission nodes. A role is either attached to one permission
//! node or free-standing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::ActiveFlag;

/// A role, scoped to a permission node or free-standing.
///
/// Name and slug are unique among roles attached to the same permission node
/// (or among free-standing roles).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique identifier
    pub code: Uuid,

    /// Human-readable name
    pub name: String,

    /// URL-friendly slug, used as the role key in snapshots
    pub slug: String,

    /// Optional description
    pub description: Option<String>,

    /// Whether the role is active
    pub active: ActiveFlag,

    /// Permission node this role is attached to, `None` if free-standing
    pub permission_code: Option<Uuid>,

    /// When the role was created
    pub created_at: DateTime<Utc>,

    /// When the role was last updated
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Check if the role is active.
    pub fn is_active(&self) -> bool {
        self.active.is_active()
    }

    /// Check if this is a free-standing role.
    pub fn is_root(&self) -> bool {
        self.permission_code.is_none()
    }
}

/// Input for creating a role.
///
/// # Examples
///
/// ```
/// use acl_registry::NewRole;
/// use uuid::Uuid;
///
/// let panel = Uuid::now_v7();
/// let input = NewRole::new("Admin").with_description("Full access").under(panel);
/// assert_eq!(input.permission_code, Some(panel));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRole {
    /// Name of the role
    pub name: String,

    /// Explicit slug
    #[serde(default)]
    pub slug: Option<String>,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Permission node to attach the role to
    #[serde(default)]
    pub permission_code: Option<Uuid>,
}

impl NewRole {
    /// Start an input with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set an explicit slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach the role to the permission node `permission_code`.
    pub fn under(mut self, permission_code: Uuid) -> Self {
        self.permission_code = Some(permission_code);
        self
    }
}

/// Link granting a permission node to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermission {
    /// Unique identifier
    pub code: Uuid,

    /// Role receiving the permission
    pub role_code: Uuid,

    /// Permission node granted
    pub permission_code: Uuid,
}

impl RolePermission {
    /// Create a link with a fresh code.
    pub fn new(role_code: Uuid, permission_code: Uuid) -> Self {
        Self {
            code: Uuid::now_v7(),
            role_code,
            permission_code,
        }
    }

    /// Check if this link connects `role_code` and `permission_code`.
    pub fn links(&self, role_code: Uuid, permission_code: Uuid) -> bool {
        self.role_code == role_code && self.permission_code == permission_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_role_builder() {
        let input = NewRole::new("Support").with_slug("sup");
        assert_eq!(input.slug.as_deref(), Some("sup"));
        assert!(input.permission_code.is_none());
        assert!(input.description.is_none());
    }

    #[test]
    fn test_role_permission_links() {
        let role = Uuid::now_v7();
        let permission = Uuid::now_v7();
        let link = RolePermission::new(role, permission);

        assert!(link.links(role, permission));
        assert!(!link.links(permission, role));
    }
}
