//! # Repo Provisioner Core
//!
//! This crate provides the orchestration logic for provisioning a GitLab repository that
//! follows one of two branching strategies (`gitflow` or `trunk`).
//!
//! ## Overview
//!
//! A run is a fixed sequence of stages:
//! 1. Resolve the target group
//! 2. Create the repository
//! 3. Seed the strategy's branch
//! 4. Set the default branch
//! 5. Configure protected branches
//! 6. Install webhooks
//! 7. Configure merge checks and approval rules
//!
//! Stages 1 and 2 are fatal: if either fails, [`provision_repository`] returns an error
//! and nothing else is attempted. Every later step is attempted independently and its
//! result lands in the returned [`ProvisioningReport`].
//!
//! ## Examples
//!
//! ```no_run
//! use gitlab_client::GitLabClient;
//! use repo_provisioner_core::{provision_repository, Configuration};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Configuration::from_env()?;
//! let client = GitLabClient::new(config.platform_url(), config.api_token())?;
//!
//! let report = provision_repository(&config, &client).await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! Every stage talks to GitLab through the [`ProjectClient`] trait, passed in explicitly,
//! so the sequence can be driven against a mock in tests.

use chrono::Utc;
use gitlab_client::{Group, Project, ProjectClient, ProjectCreatePayload};
use tracing::{error, info, warn};

mod errors;
pub use errors::{ConfigurationError, ProvisionerError, ProvisionerResult};

pub mod configuration;
pub use configuration::{normalize_repo_name, Configuration, DEFAULT_WEBHOOK_URL};

pub mod strategy;
pub use strategy::{BranchingStrategy, SeedBranch};

pub mod report;
pub use report::{ProvisioningReport, Stage, StepOutcome, StepReport};

pub mod branch_manager;
pub use branch_manager::BranchManager;

pub mod protection_manager;
pub use protection_manager::ProtectionManager;

pub mod webhook_manager;
pub use webhook_manager::WebhookManager;

pub mod merge_settings_manager;
pub use merge_settings_manager::MergeSettingsManager;

#[cfg(test)]
mod test_support;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Provisions and configures a repository as described by `config`.
///
/// # Errors
///
/// - `ProvisionerError::GroupNotFound` / `GroupLookupFailed` if the group cannot be
///   resolved; no repository is created
/// - `ProvisionerError::RepositoryCreationFailed` if GitLab refuses to create the
///   repository
///
/// Failures after the repository exists are not errors; they are recorded in the report
/// and leave the repository partially configured.
pub async fn provision_repository(
    config: &Configuration,
    client: &dyn ProjectClient,
) -> ProvisionerResult<ProvisioningReport> {
    let started_at = Utc::now();
    let strategy = config.branching_strategy();

    let group = resolve_group(client, config.group_path()).await?;
    let project = create_repository(client, &group, config.repo_name()).await?;

    let mut steps = vec![
        StepReport::succeeded(
            Stage::ResolveGroup,
            config.group_path(),
            format!("group id {}", group.id),
        ),
        StepReport::succeeded(
            Stage::CreateRepository,
            config.repo_name(),
            format!("project id {}", project.id),
        ),
    ];

    let branches = BranchManager::new(client);
    steps.push(branches.seed_branch(project.id, strategy).await);
    steps.push(
        branches
            .set_default_branch(project.id, strategy.default_branch())
            .await,
    );

    steps.extend(ProtectionManager::new(client).apply(project.id, strategy).await);
    steps.extend(
        WebhookManager::new(client)
            .install(project.id, config.webhook_url())
            .await,
    );
    steps.extend(MergeSettingsManager::new(client).apply(project.id).await);

    let report = ProvisioningReport {
        repo_name: config.repo_name().to_string(),
        group_path: config.group_path().to_string(),
        branching_strategy: strategy,
        project_id: project.id,
        web_url: project.web_url,
        steps,
        started_at,
        finished_at: Utc::now(),
    };

    if report.is_success() {
        info!(repo_name = %report.repo_name, "{}", report.summary());
    } else {
        warn!(
            repo_name = %report.repo_name,
            failed_steps = report.failure_count(),
            "{}",
            report.summary()
        );
    }

    Ok(report)
}

async fn resolve_group(client: &dyn ProjectClient, group_path: &str) -> ProvisionerResult<Group> {
    match client.get_group(group_path).await {
        Ok(group) => {
            info!(group_path = group_path, group_id = group.id, "Group '{}' found.", group_path);
            Ok(group)
        }
        Err(e) if e.is_not_found() => {
            error!(group_path = group_path, "Group '{}' not found.", group_path);
            Err(ProvisionerError::GroupNotFound {
                path: group_path.to_string(),
            })
        }
        Err(e) => {
            error!(group_path = group_path, error = %e, "Failed to look up group");
            Err(ProvisionerError::GroupLookupFailed {
                path: group_path.to_string(),
                reason: e.to_string(),
            })
        }
    }
}

async fn create_repository(
    client: &dyn ProjectClient,
    group: &Group,
    repo_name: &str,
) -> ProvisionerResult<Project> {
    let payload = ProjectCreatePayload {
        name: repo_name.to_string(),
        namespace_id: group.id,
    };

    match client.create_project(&payload).await {
        Ok(project) => {
            info!(
                repo_name = repo_name,
                project_id = project.id,
                "Repository '{}' created successfully.",
                repo_name
            );
            Ok(project)
        }
        Err(e) => {
            error!(repo_name = repo_name, error = %e, "Error creating repository");
            Err(ProvisionerError::RepositoryCreationFailed {
                name: repo_name.to_string(),
                reason: e.to_string(),
            })
        }
    }
}
