//! Protected branch configuration.
//!
//! This module provides the [`ProtectionManager`] component, which replaces the rule
//! GitLab puts on `master` with the rules of the selected branching strategy.

use gitlab_client::{ProjectClient, ProtectedBranchPayload};
use tracing::{info, warn};

use crate::report::{Stage, StepReport};
use crate::strategy::{BranchingStrategy, MASTER_BRANCH};

#[cfg(test)]
#[path = "protection_manager_tests.rs"]
mod tests;

/// Manages protected branch rules for a new project.
pub struct ProtectionManager<'a> {
    client: &'a dyn ProjectClient,
}

impl<'a> ProtectionManager<'a> {
    pub fn new(client: &'a dyn ProjectClient) -> Self {
        Self { client }
    }

    /// Removes any existing `master` rule, then installs the strategy's rules.
    ///
    /// # Behavior
    ///
    /// 1. Deletes the `master` protection rule; a missing rule is reported as skipped
    /// 2. Creates each rule from [`BranchingStrategy::protection_rules`]
    /// 3. Returns one step per sub-step
    ///
    /// Each sub-step is attempted regardless of how the previous ones ended.
    pub async fn apply(&self, project_id: u64, strategy: BranchingStrategy) -> Vec<StepReport> {
        let mut steps = vec![self.remove_existing_rule(project_id, MASTER_BRANCH).await];

        for rule in strategy.protection_rules() {
            steps.push(self.protect(project_id, &rule).await);
        }

        let failed = steps.iter().filter(|s| s.is_failure()).count();
        if failed == 0 {
            info!(strategy = %strategy, "Protected branches configured for {}.", strategy);
        } else {
            warn!(strategy = %strategy, failed = failed, "Protected branch configuration incomplete");
        }

        steps
    }

    async fn remove_existing_rule(&self, project_id: u64, branch: &str) -> StepReport {
        match self.client.delete_protected_branch(project_id, branch).await {
            Ok(()) => {
                info!(branch = branch, "Existing rules for '{}' branch removed.", branch);
                StepReport::succeeded(Stage::ConfigureProtection, branch, "existing rule removed")
            }
            Err(e) if e.is_not_found() => {
                info!(branch = branch, "No existing rules for '{}' branch found.", branch);
                StepReport::skipped(Stage::ConfigureProtection, branch, "no existing rule found")
            }
            Err(e) => {
                warn!(branch = branch, error = %e, "Failed to remove existing protection rule");
                StepReport::failed(
                    Stage::ConfigureProtection,
                    branch,
                    format!("removing existing rule failed: {e}"),
                )
            }
        }
    }

    async fn protect(&self, project_id: u64, rule: &ProtectedBranchPayload) -> StepReport {
        match self.client.protect_branch(project_id, rule).await {
            Ok(_) => {
                info!(branch = %rule.name, "Protected branch rule created");
                StepReport::succeeded(Stage::ConfigureProtection, &rule.name, describe(rule))
            }
            Err(e) => {
                warn!(branch = %rule.name, error = %e, "Error configuring protected branch");
                StepReport::failed(Stage::ConfigureProtection, &rule.name, e.to_string())
            }
        }
    }
}

fn describe(rule: &ProtectedBranchPayload) -> String {
    match rule.merge_access_level {
        Some(merge) => format!(
            "protected (push: {}, merge: {})",
            rule.push_access_level, merge
        ),
        None => format!("protected (push: {})", rule.push_access_level),
    }
}
