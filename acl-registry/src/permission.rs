//! Permission tree domain models
//!
//! This module provides the PermissionNode entity. Nodes form a tree through
//! an optional parent code; each node carries an "ability" path built
//! from its ancestors' slugs when it is created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::ActiveFlag;

/// A node of the permission tree.
///
/// # Architecture
///
/// ```text
/// panel-admin                              (root, parent_code = None)
///   └─ panel-admin->module-users
///        └─ panel-admin->module-users->users
///             └─ panel-admin->module-users->users->create
/// ```
///
/// Name and slug are unique among siblings; the ability is unique across the
/// whole tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionNode {
    /// Unique identifier
    pub code: Uuid,

    /// Human-readable name (unique under the parent)
    pub name: String,

    /// URL-friendly slug (unique under the parent)
    pub slug: String,

    /// Full path of slugs from the root (unique across the tree)
    pub ability: String,

    /// Free-form note
    pub note: Option<String>,

    /// Optional description
    pub description: Option<String>,

    /// Whether the permission is active
    pub active: ActiveFlag,

    /// Parent node, `None` for a root node
    pub parent_code: Option<Uuid>,

    /// When the node was created
    pub created_at: DateTime<Utc>,

    /// When the node was last updated
    pub updated_at: DateTime<Utc>,
}

impl PermissionNode {
    /// Check if the permission is active.
    pub fn is_active(&self) -> bool {
        self.active.is_active()
    }

    /// Check if this is a root node.
    pub fn is_root(&self) -> bool {
        self.parent_code.is_none()
    }
}

/// Input for creating a permission node.
///
/// Only the name is required. A missing slug is derived from the name, and a
/// missing ability is derived from the parent's ability and the slug.
///
/// # Examples
///
/// ```
/// use acl_registry::NewPermission;
///
/// let input = NewPermission::new("Module Users").with_note("Back office");
/// assert!(input.slug.is_none());
/// assert_eq!(input.note.as_deref(), Some("Back office"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPermission {
    /// Name of the node
    pub name: String,

    /// Explicit slug
    #[serde(default)]
    pub slug: Option<String>,

    /// Explicit ability
    #[serde(default)]
    pub ability: Option<String>,

    /// Free-form note
    #[serde(default)]
    pub note: Option<String>,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Parent node
    #[serde(default)]
    pub parent_code: Option<Uuid>,
}

impl NewPermission {
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

    /// Set an explicit ability instead of deriving it.
    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = Some(ability.into());
        self
    }

    /// Set the note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Place the node under `parent_code`.
    pub fn under(mut self, parent_code: Uuid) -> Self {
        self.parent_code = Some(parent_code);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_permission_builder() {
        let parent = Uuid::now_v7();
        let input = NewPermission::new("Users")
            .with_slug("usr")
            .with_ability("custom->usr")
            .with_description("User management")
            .under(parent);

        assert_eq!(input.name, "Users");
        assert_eq!(input.slug.as_deref(), Some("usr"));
        assert_eq!(input.ability.as_deref(), Some("custom->usr"));
        assert_eq!(input.parent_code, Some(parent));
        assert!(input.note.is_none());
    }

    #[test]
    fn test_node_status() {
        let now = Utc::now();
        let mut node = PermissionNode {
            code: Uuid::now_v7(),
            name: "Panel Admin".to_string(),
            slug: "panel-admin".to_string(),
            ability: "panel-admin".to_string(),
            note: None,
            description: None,
            active: ActiveFlag::Yes,
            parent_code: None,
            created_at: now,
            updated_at: now,
        };

        assert!(node.is_root());
        assert!(node.is_active());

        node.active = ActiveFlag::No;
        node.parent_code = Some(Uuid::now_v7());
        assert!(!node.is_root());
        assert!(!node.is_active());
    }
}
