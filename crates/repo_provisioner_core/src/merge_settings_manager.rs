//! Merge request settings: merge checks, approval rules and approval settings.

use gitlab_client::{ApprovalRulePayload, ApprovalSettings, ProjectClient, ProjectSettingsUpdate};
use tracing::{info, warn};

use crate::report::{Stage, StepReport};

#[cfg(test)]
#[path = "merge_settings_manager_tests.rs"]
mod tests;

/// Approval rules created on every project.
pub const APPROVAL_RULE_NAMES: [&str; 2] = ["CoreReviewer", "SeniorDevs"];

/// Approvals required per rule and before merge.
pub const REQUIRED_APPROVALS: u32 = 1;

/// Applies the merge request policy to a project.
pub struct MergeSettingsManager<'a> {
    client: &'a dyn ProjectClient,
}

impl<'a> MergeSettingsManager<'a> {
    pub fn new(client: &'a dyn ProjectClient) -> Self {
        Self { client }
    }

    /// Enables merge checks, creates the approval rules and sets the approval settings.
    ///
    /// Returns one step for the merge checks, one per approval rule and one for the
    /// approval settings. A failing sub-step does not stop the others.
    pub async fn apply(&self, project_id: u64) -> Vec<StepReport> {
        let mut steps = vec![self.enable_merge_checks(project_id).await];

        for name in APPROVAL_RULE_NAMES {
            steps.push(self.create_approval_rule(project_id, name).await);
        }

        steps.push(self.configure_approvals(project_id).await);
        steps
    }

    async fn enable_merge_checks(&self, project_id: u64) -> StepReport {
        let settings = ProjectSettingsUpdate {
            merge_pipelines_enabled: Some(true),
            only_allow_merge_if_pipeline_succeeds: Some(true),
            only_allow_merge_if_all_discussions_are_resolved: Some(true),
            ..Default::default()
        };

        match self.client.update_project(project_id, &settings).await {
            Ok(_) => {
                info!("Merge checks enabled.");
                StepReport::succeeded(
                    Stage::ConfigureMergeSettings,
                    "merge checks",
                    "pipeline success and resolved discussions required",
                )
            }
            Err(e) => {
                warn!(error = %e, "Error enabling merge checks");
                StepReport::failed(Stage::ConfigureMergeSettings, "merge checks", e.to_string())
            }
        }
    }

    async fn create_approval_rule(&self, project_id: u64, name: &str) -> StepReport {
        let rule = ApprovalRulePayload::regular(name, REQUIRED_APPROVALS);

        match self.client.create_approval_rule(project_id, &rule).await {
            Ok(_) => {
                info!(rule = name, "Approval rule '{}' added successfully.", name);
                StepReport::succeeded(
                    Stage::ConfigureMergeSettings,
                    format!("approval rule {name}"),
                    format!("requires {REQUIRED_APPROVALS} approval"),
                )
            }
            Err(e) => {
                warn!(rule = name, error = %e, "Error adding approval rule '{}'", name);
                StepReport::failed(
                    Stage::ConfigureMergeSettings,
                    format!("approval rule {name}"),
                    e.to_string(),
                )
            }
        }
    }

    async fn configure_approvals(&self, project_id: u64) -> StepReport {
        let settings = ApprovalSettings {
            approvals_before_merge: Some(REQUIRED_APPROVALS),
            reset_approvals_on_push: Some(false),
            disable_overriding_approvers_per_merge_request: Some(true),
        };

        match self.client.update_approval_settings(project_id, &settings).await {
            Ok(_) => {
                info!("Approval settings configured.");
                StepReport::succeeded(
                    Stage::ConfigureMergeSettings,
                    "approval settings",
                    format!(
                        "{REQUIRED_APPROVALS} approval before merge; approvers cannot be overridden"
                    ),
                )
            }
            Err(e) => {
                warn!(error = %e, "Error configuring approval settings");
                StepReport::failed(
                    Stage::ConfigureMergeSettings,
                    "approval settings",
                    e.to_string(),
                )
            }
        }
    }
}
