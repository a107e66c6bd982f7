//! Merge request approval types.
//!
//! Covers the project-level approval rules endpoint (`/projects/:id/approval_rules`) and
//! the project approval settings endpoint (`/projects/:id/approvals`).

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "approval_rule_tests.rs"]
mod tests;

/// The kind of an approval rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalRuleType {
    Regular,
    AnyApprover,
}

/// Payload for `POST /projects/:id/approval_rules`.
///
/// # Examples
///
/// ```rust
/// use gitlab_client::ApprovalRulePayload;
///
/// let rule = ApprovalRulePayload::regular("CoreReviewer", 1);
/// let json = serde_json::to_value(&rule).unwrap();
/// assert_eq!(json["rule_type"], "regular");
/// assert_eq!(json["user_ids"], serde_json::json!([]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalRulePayload {
    pub name: String,
    pub approvals_required: u32,
    pub user_ids: Vec<u64>,
    pub group_ids: Vec<u64>,
    pub rule_type: ApprovalRuleType,
}

impl ApprovalRulePayload {
    /// A regular rule with no eligible users or groups attached.
    pub fn regular(name: impl Into<String>, approvals_required: u32) -> Self {
        Self {
            name: name.into(),
            approvals_required,
            user_ids: Vec::new(),
            group_ids: Vec::new(),
            rule_type: ApprovalRuleType::Regular,
        }
    }
}

/// An approval rule as returned by GitLab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRule {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub approvals_required: u32,
    #[serde(default)]
    pub rule_type: Option<String>,
}

/// Payload for `POST /projects/:id/approvals`.
/// Use `Default::default()` and set only the fields that should change.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct ApprovalSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approvals_before_merge: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_approvals_on_push: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_overriding_approvers_per_merge_request: Option<bool>,
}
