//! The provision command: validate, connect, run, report.

use gitlab_client::GitLabClient;
use repo_provisioner_core::{provision_repository, ProvisioningReport};
use tracing::{debug, info};

use crate::config::Cli;
use crate::errors::Error;

#[cfg(test)]
#[path = "provision_cmd_tests.rs"]
mod tests;

/// Validates the inputs in `cli` and provisions the repository they describe.
///
/// Validation happens before the client is built, so an invalid input never results in
/// a request to GitLab.
///
/// # Errors
///
/// - `Error::Configuration` if an input is missing or invalid
/// - `Error::Client` if the GitLab URL cannot serve as an API base
/// - `Error::Provisioning` if the group cannot be resolved or the repository cannot be
///   created
pub async fn execute(cli: &Cli) -> Result<ProvisioningReport, Error> {
    let config = cli.configuration()?;
    debug!(gitlab_url = %config.platform_url(), "Connecting to GitLab");

    let client = GitLabClient::new(config.platform_url(), config.api_token())?;
    let report = provision_repository(&config, &client).await?;

    info!(
        project_id = report.project_id,
        failed_steps = report.failure_count(),
        "Provisioning finished"
    );
    Ok(report)
}
