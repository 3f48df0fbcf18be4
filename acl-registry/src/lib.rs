//! # ACL Registry
//!
//! This crate provides the permission tree and role registry that feed the
//! `acl-engine` resolver.
//!
//! ## Overview
//!
//! The acl-registry crate handles:
//! - **Permissions**: A tree of permission nodes, each carrying an ability path
//! - **Roles**: Roles attached to a permission node, or free-standing
//! - **Grants**: Links between roles and the permission nodes they hold
//! - **Settings**: Ability separator, active defaults and active labels
//! - **Snapshots**: Building the engine's two-tier snapshot from the records
//!
//! ## Architecture
//!
//! ```text
//! AclRepository (MemoryAclRepository)
//!   ├─ PermissionNode tree ──┐
//!   ├─ Role ─────────────────┼─→ SnapshotBuilder ─→ Snapshot ─→ SharedSnapshot
//!   └─ RolePermission ───────┘                                     │
//!                                                        PermissionResolver
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use acl_registry::{AclRepository, MemoryAclRepository, NewPermission, NewRole, SnapshotBuilder};
//! use acl_engine::PermissionResolver;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), acl_registry::AclError> {
//! let repo = MemoryAclRepository::new();
//!
//! let panel = repo.create_permission(NewPermission::new("Panel Admin")).await?;
//! let users = repo.create_permission(NewPermission::new("Users").under(panel.code)).await?;
//! assert_eq!(users.ability, "panel-admin->users");
//!
//! let admin = repo.create_role(NewRole::new("Admin").under(panel.code)).await?;
//! repo.add_permission(admin.code, users.code).await?;
//!
//! let snapshot = SnapshotBuilder::new().build_from(&repo).await?;
//! let resolver = PermissionResolver::new(&snapshot);
//! assert!(resolver.has_permission_in_role_under("panel-admin", "admin", "panel-admin->users"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure Model
//!
//! Writes validate uniqueness before touching storage and fail with a typed
//! [`AclError`]. A rejected write leaves the registry unchanged.

pub mod builder;
pub mod error;
pub mod permission;
pub mod repository;
pub mod role;
pub mod settings;
pub mod slug;
pub mod status;

// Re-export main types for convenience
pub use builder::SnapshotBuilder;
pub use error::{AclError, AclResult};
pub use permission::{NewPermission, PermissionNode};
pub use repository::{AclRecords, AclRepository, MemoryAclRepository};
pub use role::{NewRole, Role, RolePermission};
pub use settings::{AclSettings, ActiveLabels};
pub use slug::slugify;
pub use status::ActiveFlag;
