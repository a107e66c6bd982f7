//! Branching strategies and the branch layout each one implies.
//!
//! A strategy decides which branch is seeded after the repository is created, which
//! branch becomes the default, and which protection rules are installed.

use std::str::FromStr;

use gitlab_client::{AccessLevel, ProtectedBranchPayload};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

#[cfg(test)]
#[path = "strategy_tests.rs"]
mod tests;

/// The branch every new repository starts from.
pub const MASTER_BRANCH: &str = "master";

/// Long-lived integration branch used by gitflow.
pub const DEVELOP_BRANCH: &str = "develop";

/// Pattern matching gitflow release branches.
pub const RELEASE_BRANCH_PATTERN: &str = "release*";

/// The supported branching strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchingStrategy {
    /// Long-lived `develop`, `master` and `release*` branches.
    Gitflow,
    /// A single long-lived `master` branch.
    Trunk,
}

/// A branch to create and the ref it is created from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedBranch {
    pub name: &'static str,
    pub source_ref: &'static str,
}

impl BranchingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gitflow => "gitflow",
            Self::Trunk => "trunk",
        }
    }

    /// The branch created right after the repository.
    ///
    /// Trunk re-creates `master` from itself; GitLab rejects that when `master` already
    /// exists, which the run reports as a failed step.
    pub fn seed_branch(&self) -> SeedBranch {
        match self {
            Self::Gitflow => SeedBranch {
                name: DEVELOP_BRANCH,
                source_ref: MASTER_BRANCH,
            },
            Self::Trunk => SeedBranch {
                name: MASTER_BRANCH,
                source_ref: MASTER_BRANCH,
            },
        }
    }

    /// The branch set as the project default. Always the seeded branch.
    pub fn default_branch(&self) -> &'static str {
        self.seed_branch().name
    }

    /// The protection rules installed for this strategy, in installation order.
    pub fn protection_rules(&self) -> Vec<ProtectedBranchPayload> {
        match self {
            Self::Gitflow => vec![
                protected(DEVELOP_BRANCH, Some(AccessLevel::Developer)),
                protected(MASTER_BRANCH, None),
                protected(RELEASE_BRANCH_PATTERN, Some(AccessLevel::Developer)),
            ],
            Self::Trunk => vec![protected(MASTER_BRANCH, Some(AccessLevel::Developer))],
        }
    }
}

// Every rule lets maintainers push, allows force pushes and requires code owner approval.
fn protected(name: &str, merge_access_level: Option<AccessLevel>) -> ProtectedBranchPayload {
    ProtectedBranchPayload {
        name: name.to_string(),
        push_access_level: AccessLevel::Maintainer,
        merge_access_level,
        allow_force_push: true,
        code_owner_approval_required: true,
    }
}

impl FromStr for BranchingStrategy {
    type Err = ConfigurationError;

    /// Parses the exact, lowercase strategy name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gitflow" => Ok(Self::Gitflow),
            "trunk" => Ok(Self::Trunk),
            other => Err(ConfigurationError::InvalidBranchingStrategy {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for BranchingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
