//! Project domain types.
//!
//! This module contains types representing GitLab groups, projects and branches, together
//! with the payloads used to create and update them.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// Represents a GitLab group (namespace).
///
/// # Examples
///
/// ```rust
/// use gitlab_client::Group;
///
/// let group: Group = serde_json::from_str(
///     r#"{"id": 42, "name": "Services", "full_path": "platform/services"}"#,
/// ).unwrap();
/// assert_eq!(group.id, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// The numeric ID of the group, used as `namespace_id` when creating projects
    pub id: u64,
    /// The display name of the group
    pub name: String,
    /// The full path of the group, including parent groups
    pub full_path: String,
}

/// Represents a GitLab project (repository).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// The numeric ID of the project
    pub id: u64,
    /// The name of the project
    pub name: String,
    /// The path of the project including its namespace
    #[serde(default)]
    pub path_with_namespace: String,
    /// The browser URL of the project
    #[serde(default)]
    pub web_url: Option<String>,
    /// The default branch, absent for projects without commits
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// Represents a branch of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// The branch name
    pub name: String,
    /// Whether the branch is protected
    #[serde(default)]
    pub protected: bool,
    /// Whether the branch is the project's default branch
    #[serde(default)]
    pub default: bool,
}

/// Payload for `POST /projects`.
#[derive(Serialize, Default, Debug, Clone, PartialEq)]
pub struct ProjectCreatePayload {
    pub name: String,

    /// The namespace (group) the project is created in
    pub namespace_id: u64,
}

/// Payload for `POST /projects/:id/repository/branches`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BranchCreatePayload {
    /// The name of the new branch
    pub branch: String,

    /// The branch name or commit SHA the new branch starts from
    #[serde(rename = "ref")]
    pub source_ref: String,
}

/// Represents the project attributes that can be updated.
/// Use `Default::default()` and set only the fields that should change.
#[derive(Serialize, Default, Debug, Clone, PartialEq)]
pub struct ProjectSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_close_referenced_issues: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_pipelines_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_allow_merge_if_pipeline_succeeds: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_allow_merge_if_all_discussions_are_resolved: Option<bool>,
}
