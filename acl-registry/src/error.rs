//! Error types for registry operations
//!
//! This module defines the failures the permission tree and role registry
//! report to callers. Uniqueness violations and failed lookups are kept as
//! distinct families so callers can tell "already exists" from "does not exist".

use thiserror::Error;
use uuid::Uuid;

/// Registry error types.
#[derive(Debug, Error)]
pub enum AclError {
    /// A permission with this name already exists under the same parent
    #[error("A permission named `{0}` already exists")]
    PermissionNameExists(String),

    /// A permission with this slug already exists under the same parent
    #[error("A permission with slug `{0}` already exists")]
    PermissionSlugExists(String),

    /// A permission with this ability already exists anywhere in the tree
    #[error("A permission with ability `{0}` already exists")]
    PermissionAbilityExists(String),

    /// A role with this name already exists under the same parent permission
    #[error("A role named `{0}` already exists")]
    RoleNameExists(String),

    /// A role with this slug already exists under the same parent permission
    #[error("A role with slug `{0}` already exists")]
    RoleSlugExists(String),

    /// No permission has this code
    #[error("There is no permission with code `{0}`")]
    PermissionNotFound(Uuid),

    /// No permission has this name in the requested scope
    #[error("There is no permission named `{0}`")]
    PermissionNamed(String),

    /// No role has this code
    #[error("There is no role with code `{0}`")]
    RoleNotFound(Uuid),

    /// No role has this name in the requested scope
    #[error("There is no role named `{0}`")]
    RoleNamed(String),

    /// The name yields an empty slug and no slug was given
    #[error("`{0}` does not produce a usable slug")]
    InvalidSlug(String),

    /// The requested parent would make a permission its own ancestor
    #[error("Permission `{0}` cannot be placed under itself or a descendant")]
    InvalidParent(Uuid),

    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// The storage backend failed
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for registry operations.
pub type AclResult<T> = Result<T, AclError>;

impl AclError {
    /// Check if this is a uniqueness violation (name, slug or ability).
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            AclError::PermissionNameExists(_)
                | AclError::PermissionSlugExists(_)
                | AclError::PermissionAbilityExists(_)
                | AclError::RoleNameExists(_)
                | AclError::RoleSlugExists(_)
        )
    }

    /// Check if this is a failed lookup.
    pub fn is_does_not_exist(&self) -> bool {
        matches!(
            self,
            AclError::PermissionNotFound(_)
                | AclError::PermissionNamed(_)
                | AclError::RoleNotFound(_)
                | AclError::RoleNamed(_)
        )
    }

    /// Check if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(self, AclError::Config(_) | AclError::Storage(_))
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AclError::PermissionNameExists(_) => "PERMISSION_NAME_EXISTS",
            AclError::PermissionSlugExists(_) => "PERMISSION_SLUG_EXISTS",
            AclError::PermissionAbilityExists(_) => "PERMISSION_ABILITY_EXISTS",
            AclError::RoleNameExists(_) => "ROLE_NAME_EXISTS",
            AclError::RoleSlugExists(_) => "ROLE_SLUG_EXISTS",
            AclError::PermissionNotFound(_) | AclError::PermissionNamed(_) => "PERMISSION_NOT_FOUND",
            AclError::RoleNotFound(_) | AclError::RoleNamed(_) => "ROLE_NOT_FOUND",
            AclError::InvalidSlug(_) => "INVALID_SLUG",
            AclError::InvalidParent(_) => "INVALID_PARENT",
            AclError::Config(_) => "CONFIG_ERROR",
            AclError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_families() {
        let exists = AclError::PermissionAbilityExists("panel-admin".to_string());
        assert!(exists.is_already_exists());
        assert!(!exists.is_does_not_exist());

        let missing = AclError::RoleNotFound(Uuid::now_v7());
        assert!(missing.is_does_not_exist());
        assert!(!missing.is_already_exists());

        let config = AclError::Config("bad".to_string());
        assert!(!config.is_already_exists());
        assert!(!config.is_does_not_exist());
        assert!(config.is_server_error());
        assert!(!exists.is_server_error());
    }

    #[test]
    fn test_error_messages() {
        let err = AclError::RoleSlugExists("admin".to_string());
        assert_eq!(err.to_string(), "A role with slug `admin` already exists");
        assert_eq!(err.error_code(), "ROLE_SLUG_EXISTS");

        let err = AclError::PermissionNamed("Users".to_string());
        assert_eq!(err.error_code(), "PERMISSION_NOT_FOUND");

        let err = AclError::InvalidSlug("!!!".to_string());
        assert_eq!(err.to_string(), "`!!!` does not produce a usable slug");
        assert_eq!(err.error_code(), "INVALID_SLUG");
        assert!(!err.is_already_exists());
        assert!(!err.is_server_error());
    }
}
