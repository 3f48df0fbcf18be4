//! Active status shared by permissions and roles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a permission or role is active.
///
/// Stored and serialized as the single letters `Y` and `N`.
///
/// # Examples
///
/// ```
/// use acl_registry::ActiveFlag;
///
/// assert_eq!(ActiveFlag::parse("y"), Some(ActiveFlag::Yes));
/// assert_eq!(ActiveFlag::No.as_str(), "N");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ActiveFlag {
    /// Active
    #[default]
    #[serde(rename = "Y")]
    Yes,

    /// Inactive
    #[serde(rename = "N")]
    No,
}

impl ActiveFlag {
    /// The stored letter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveFlag::Yes => "Y",
            ActiveFlag::No => "N",
        }
    }

    /// Parse from the stored letter (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "Y" => Some(ActiveFlag::Yes),
            "N" => Some(ActiveFlag::No),
            _ => None,
        }
    }

    /// `true` for [`ActiveFlag::Yes`].
    pub fn is_active(&self) -> bool {
        matches!(self, ActiveFlag::Yes)
    }
}

impl From<bool> for ActiveFlag {
    fn from(active: bool) -> Self {
        if active {
            ActiveFlag::Yes
        } else {
            ActiveFlag::No
        }
    }
}

impl fmt::Display for ActiveFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
