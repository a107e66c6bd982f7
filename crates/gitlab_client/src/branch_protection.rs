//! Branch protection domain types.
//!
//! This module contains types representing GitLab protected branches and the role levels
//! that restrict who may push to or merge into them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(test)]
#[path = "branch_protection_tests.rs"]
mod tests;

/// GitLab role levels as used by the protected branches API.
///
/// GitLab encodes these as integers on the wire (`30` for developer, `40` for maintainer
/// and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessLevel {
    NoAccess,
    Guest,
    Reporter,
    Developer,
    Maintainer,
    Owner,
    Admin,
}

impl AccessLevel {
    /// Returns the integer GitLab uses for this level.
    pub fn as_u16(&self) -> u16 {
        match self {
            Self::NoAccess => 0,
            Self::Guest => 10,
            Self::Reporter => 20,
            Self::Developer => 30,
            Self::Maintainer => 40,
            Self::Owner => 50,
            Self::Admin => 60,
        }
    }

    /// Converts the GitLab integer to a level, returning None for unknown values.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(Self::NoAccess),
            10 => Some(Self::Guest),
            20 => Some(Self::Reporter),
            30 => Some(Self::Developer),
            40 => Some(Self::Maintainer),
            50 => Some(Self::Owner),
            60 => Some(Self::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::NoAccess => "no access",
            Self::Guest => "guest",
            Self::Reporter => "reporter",
            Self::Developer => "developer",
            Self::Maintainer => "maintainer",
            Self::Owner => "owner",
            Self::Admin => "admin",
        };
        f.write_str(name)
    }
}

impl Serialize for AccessLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(self.as_u16())
    }
}

impl<'de> Deserialize<'de> for AccessLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u16::deserialize(deserializer)?;
        AccessLevel::from_u16(value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown access level: {value}")))
    }
}

/// Payload for `POST /projects/:id/protected_branches`.
///
/// `merge_access_level` is omitted from the request when `None`, leaving GitLab's
/// default in place.
///
/// # Examples
///
/// ```rust
/// use gitlab_client::{AccessLevel, ProtectedBranchPayload};
///
/// let rule = ProtectedBranchPayload {
///     name: "release*".to_string(),
///     push_access_level: AccessLevel::Maintainer,
///     merge_access_level: Some(AccessLevel::Developer),
///     allow_force_push: true,
///     code_owner_approval_required: true,
/// };
///
/// let json = serde_json::to_value(&rule).unwrap();
/// assert_eq!(json["push_access_level"], 40);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectedBranchPayload {
    /// Branch name or wildcard pattern
    pub name: String,

    /// Minimum role allowed to push
    pub push_access_level: AccessLevel,

    /// Minimum role allowed to merge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_access_level: Option<AccessLevel>,

    pub allow_force_push: bool,

    pub code_owner_approval_required: bool,
}

/// One entry of the `push_access_levels` / `merge_access_levels` lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchAccess {
    pub access_level: AccessLevel,
    #[serde(default)]
    pub access_level_description: String,
}

/// A protected branch rule as returned by GitLab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedBranch {
    #[serde(default)]
    pub id: u64,
    /// Branch name or wildcard pattern
    pub name: String,
    #[serde(default)]
    pub push_access_levels: Vec<BranchAccess>,
    #[serde(default)]
    pub merge_access_levels: Vec<BranchAccess>,
    #[serde(default)]
    pub allow_force_push: bool,
    #[serde(default)]
    pub code_owner_approval_required: bool,
}
