//! Registry settings
//!
//! This module provides the settings that control how permissions and roles
//! are created: the ability separator, the initial active status and the
//! display labels for that status.

use serde::{Deserialize, Serialize};

use acl_engine::keys::DEFAULT_ABILITY_SEPARATOR;

use crate::error::{AclError, AclResult};
use crate::status::ActiveFlag;

/// Registry settings.
///
/// Every field has a default, so a partial JSON document only overrides what
/// it names.
///
/// # Examples
///
/// ```
/// use acl_registry::{AclSettings, ActiveFlag};
///
/// let settings = AclSettings::from_json(r#"{"ability_separator": "."}"#).unwrap();
/// assert_eq!(settings.ability_separator, ".");
/// assert_eq!(settings.permission_active_default, ActiveFlag::Yes);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclSettings {
    /// Separator placed between slugs when deriving an ability
    #[serde(default = "default_separator")]
    pub ability_separator: String,

    /// Status given to newly created permissions
    #[serde(default)]
    pub permission_active_default: ActiveFlag,

    /// Status given to newly created roles
    #[serde(default)]
    pub role_active_default: ActiveFlag,

    /// Display labels for each status
    #[serde(default)]
    pub active_labels: ActiveLabels,
}

fn default_separator() -> String {
    DEFAULT_ABILITY_SEPARATOR.to_string()
}

impl Default for AclSettings {
    fn default() -> Self {
        Self {
            ability_separator: default_separator(),
            permission_active_default: ActiveFlag::Yes,
            role_active_default: ActiveFlag::Yes,
            active_labels: ActiveLabels::default(),
        }
    }
}

impl AclSettings {
    /// Load settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`AclError::Config`] if the document is malformed or the
    /// separator is empty.
    pub fn from_json(json: &str) -> AclResult<Self> {
        let settings: Self = serde_json::from_str(json).map_err(|e| AclError::Config(e.to_string()))?;
        if settings.ability_separator.is_empty() {
            return Err(AclError::Config("ability_separator must not be empty".to_string()));
        }
        Ok(settings)
    }

    /// Display label for a status.
    pub fn active_label(&self, flag: ActiveFlag) -> &str {
        match flag {
            ActiveFlag::Yes => &self.active_labels.active,
            ActiveFlag::No => &self.active_labels.inactive,
        }
    }
}

/// Display labels for [`ActiveFlag`] values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveLabels {
    /// Label for `Y`
    #[serde(rename = "Y", default = "default_active_label")]
    pub active: String,

    /// Label for `N`
    #[serde(rename = "N", default = "default_inactive_label")]
    pub inactive: String,
}

fn default_active_label() -> String {
    "Active".to_string()
}

fn default_inactive_label() -> String {
    "Inactive".to_string()
}

impl Default for ActiveLabels {
    fn default() -> Self {
        Self {
            active: default_active_label(),
            inactive: default_inactive_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = AclSettings::default();
        assert_eq!(settings.ability_separator, "->");
        assert_eq!(settings.role_active_default, ActiveFlag::Yes);
        assert_eq!(settings.active_label(ActiveFlag::No), "Inactive");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = AclSettings::from_json(
            r#"{"role_active_default": "N", "active_labels": {"Y": "Ativo"}}"#,
        )
        .unwrap();

        assert_eq!(settings.role_active_default, ActiveFlag::No);
        assert_eq!(settings.permission_active_default, ActiveFlag::Yes);
        assert_eq!(settings.active_label(ActiveFlag::Yes), "Ativo");
        assert_eq!(settings.active_label(ActiveFlag::No), "Inactive");
        assert_eq!(settings.ability_separator, "->");
    }

    #[test]
    fn test_invalid_settings() {
        let err = AclSettings::from_json("{").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");

        let err = AclSettings::from_json(r#"{"ability_separator": ""}"#).unwrap_err();
        assert!(matches!(err, AclError::Config(_)));

        let err = AclSettings::from_json(r#"{"role_active_default": "maybe"}"#).unwrap_err();
        assert!(matches!(err, AclError::Config(_)));
    }
}
