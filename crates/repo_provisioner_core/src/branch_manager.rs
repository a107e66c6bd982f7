//! Branch seeding and default branch selection.

use gitlab_client::{BranchCreatePayload, ProjectClient, ProjectSettingsUpdate};
use tracing::{info, warn};

use crate::report::{Stage, StepReport};
use crate::strategy::BranchingStrategy;

#[cfg(test)]
#[path = "branch_manager_tests.rs"]
mod tests;

/// Creates the strategy's long-lived branch and makes it the project default.
///
/// # Examples
///
/// ```rust,no_run
/// use gitlab_client::GitLabClient;
/// use repo_provisioner_core::{BranchManager, BranchingStrategy};
///
/// # async fn example(client: GitLabClient) {
/// let manager = BranchManager::new(&client);
/// let report = manager.seed_branch(1001, BranchingStrategy::Gitflow).await;
/// println!("{report}");
/// # }
/// ```
pub struct BranchManager<'a> {
    client: &'a dyn ProjectClient,
}

impl<'a> BranchManager<'a> {
    pub fn new(client: &'a dyn ProjectClient) -> Self {
        Self { client }
    }

    /// Creates the strategy's seed branch: `develop` from `master` for gitflow, `master`
    /// from `master` for trunk.
    pub async fn seed_branch(&self, project_id: u64, strategy: BranchingStrategy) -> StepReport {
        let seed = strategy.seed_branch();
        let payload = BranchCreatePayload {
            branch: seed.name.to_string(),
            source_ref: seed.source_ref.to_string(),
        };

        match self.client.create_branch(project_id, &payload).await {
            Ok(branch) => {
                info!(branch = %branch.name, source_ref = seed.source_ref, "Branch '{}' created successfully.", seed.name);
                StepReport::succeeded(
                    Stage::SeedBranch,
                    seed.name,
                    format!("created from '{}'", seed.source_ref),
                )
            }
            Err(e) => {
                warn!(branch = seed.name, error = %e, "Error creating branch '{}'", seed.name);
                StepReport::failed(Stage::SeedBranch, seed.name, e.to_string())
            }
        }
    }

    /// Sets the default branch and turns off closing issues referenced from commits.
    pub async fn set_default_branch(&self, project_id: u64, branch: &str) -> StepReport {
        let settings = ProjectSettingsUpdate {
            default_branch: Some(branch.to_string()),
            auto_close_referenced_issues: Some(false),
            ..Default::default()
        };

        match self.client.update_project(project_id, &settings).await {
            Ok(_) => {
                info!(branch = branch, "Default branch set to '{}'.", branch);
                StepReport::succeeded(
                    Stage::SetDefaultBranch,
                    branch,
                    "set as default; auto-close of referenced issues disabled",
                )
            }
            Err(e) => {
                warn!(branch = branch, error = %e, "Error setting default branch to '{}'", branch);
                StepReport::failed(Stage::SetDefaultBranch, branch, e.to_string())
            }
        }
    }
}
