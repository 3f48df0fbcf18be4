//! # Keys
//!
//! Naming conventions shared by everything that produces or reads a snapshot.
//! The serialized snapshot uses fixed field names, and permission paths
//! ("abilities") are built by joining slugs with a separator.

/// Field holding the roles that are attached to a permission node.
///
/// ```text
/// permission-roles:
///   panel-admin:
///     admin:
///       permissions: [panel-admin->module-users->users->create]
/// ```
pub const PERMISSION_ROLES_KEY: &str = "permission-roles";

/// Field holding the free-standing roles (not attached to any permission).
///
/// ```text
/// roles:
///   support:
///     permissions: [panel-admin->module-support->tickets->create]
/// ```
pub const ROLES_KEY: &str = "roles";

/// Field holding a role's granted permission paths.
pub const PERMISSIONS_KEY: &str = "permissions";

/// Separator placed between the slugs of an ability path.
pub const DEFAULT_ABILITY_SEPARATOR: &str = "->";

/// Build an ability path from the parent's ability and a slug.
///
/// # Arguments
///
/// * `parent_ability` - Ability of the parent node, `None` for a root node
/// * `separator` - Separator between segments
/// * `slug` - Slug of the node being created
///
/// # Example
///
/// ```
/// use acl_engine::keys::{join_ability, DEFAULT_ABILITY_SEPARATOR};
///
/// assert_eq!(join_ability(None, DEFAULT_ABILITY_SEPARATOR, "panel-admin"), "panel-admin");
/// assert_eq!(
///     join_ability(Some("panel-admin"), DEFAULT_ABILITY_SEPARATOR, "module-users"),
///     "panel-admin->module-users"
/// );
/// ```
pub fn join_ability(parent_ability: Option<&str>, separator: &str, slug: &str) -> String {
    match parent_ability {
        Some(parent) => format!("{parent}{separator}{slug}"),
        None => slug.to_string(),
    }
}

/// Split an ability path back into its slug segments.
///
/// An empty separator yields the whole path as a single segment.
pub fn split_ability<'a>(ability: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return vec![ability];
    }
    ability.split(separator).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_root_ability() {
        assert_eq!(join_ability(None, "->", "panel-admin"), "panel-admin");
    }

    #[test]
    fn test_join_nested_ability() {
        let module = join_ability(Some("panel-admin"), "->", "module-users");
        let leaf = join_ability(Some(&module), "->", "users");
        assert_eq!(leaf, "panel-admin->module-users->users");
    }

    #[test]
    fn test_join_custom_separator() {
        assert_eq!(join_ability(Some("a"), ".", "b"), "a.b");
    }

    #[test]
    fn test_split_ability() {
        assert_eq!(
            split_ability("panel-admin->module-users->users->create", "->"),
            vec!["panel-admin", "module-users", "users", "create"]
        );
        assert_eq!(split_ability("panel-admin", "->"), vec!["panel-admin"]);
        assert_eq!(split_ability("a->b", ""), vec!["a->b"]);
    }
}
