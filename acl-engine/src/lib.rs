//! # ACL Engine
//!
//! Permission resolution over an immutable two-tier snapshot of roles and
//! permissions.
//!
//! ## Overview
//!
//! The acl-engine crate handles:
//! - **Snapshot**: Roles attached to permission nodes, plus free-standing roles
//! - **Membership**: Does a group, role or permission exist / is it granted
//! - **Aggregates**: "All of" and "any of" forms of every membership query
//! - **Search**: Literal substring search over permission paths
//! - **Sharing**: Atomic publication of rebuilt snapshots to readers
//!
//! ## Architecture
//!
//! ```text
//! Snapshot
//!   ├─ permission-roles: { <permission-role>: { <role>: { permissions } } }
//!   └─ roles:            { <role>: { permissions } }
//!
//! Examples:
//!   permission-roles.panel-admin.admin -> "panel-admin->module-users->users->create"
//!   roles.support                      -> "panel-admin->module-support->tickets->create"
//! ```
//!
//! The two scopes are queried independently. A role key under a
//! permission-role group says nothing about a free-standing role with the
//! same key.
//!
//! ## Usage
//!
//! ```rust
//! use acl_engine::{PermissionResolver, Snapshot};
//!
//! let snapshot = Snapshot::new()
//!     .with_permission_role("panel-admin", "admin", ["panel-admin->module-users->users->create"])
//!     .with_role("support", ["panel-admin->module-support->tickets->create"]);
//!
//! let resolver = PermissionResolver::new(&snapshot);
//!
//! assert!(resolver.has_role_under("admin", "panel-admin"));
//! assert!(resolver.has_permission("panel-admin->module-support->tickets->create"));
//! assert!(resolver.search("module-support"));
//!
//! // Aggregates over empty input are vacuously true for "all", false for "any".
//! assert!(resolver.has_all_root_roles(Vec::<&str>::new()));
//! assert!(!resolver.has_any_root_role(Vec::<&str>::new()));
//! ```
//!
//! ## Failure Model
//!
//! Queries never fail. Missing groups, missing roles and empty inputs resolve
//! to `false` (or vacuous `true` for "all" aggregates), so a partial snapshot
//! denies access rather than erroring. Only JSON decoding returns an error.

pub mod aggregate;
pub mod keys;
pub mod membership;
pub mod resolver;
pub mod search;
pub mod shared;
pub mod snapshot;

// Re-export main types for convenience
pub use resolver::PermissionResolver;
pub use shared::SharedSnapshot;
pub use snapshot::{permissions_of, PermissionPath, PermissionRoleMap, RoleEntry, RoleMap, Snapshot, SnapshotError};
