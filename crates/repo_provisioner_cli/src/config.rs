//! Command line and environment intake for the `repo-provisioner` binary.
//!
//! Every input can be passed as a flag; a missing flag falls back to the environment
//! variable of the same name. The collected values then go through
//! [`Configuration::from_lookup`], so flags get exactly the same validation as the
//! environment.

use clap::error::ErrorKind;
use clap::Parser;
use repo_provisioner_core::configuration::{
    BRANCHING_STRATEGY_VAR, GITLAB_API_TOKEN_VAR, GITLAB_URL_VAR, GROUP_PATH_VAR, REPO_NAME_VAR,
    WEBHOOK_URL_VAR,
};
use repo_provisioner_core::{Configuration, ConfigurationError};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Environment variable holding the log filter, e.g. `debug` or `gitlab_client=trace`.
pub const LOG_FILTER_VAR: &str = "REPO_PROVISIONER_LOG";

/// Repo Provisioner: create a GitLab repository set up for gitflow or trunk-based development
#[derive(Parser, Debug, Default)]
#[command(name = "repo-provisioner", version)]
#[command(
    about = "Create a GitLab repository set up for gitflow or trunk-based development",
    long_about = None
)]
pub struct Cli {
    /// Branching strategy: 'gitflow' or 'trunk'
    #[arg(long, env = BRANCHING_STRATEGY_VAR)]
    pub branching_strategy: Option<String>,

    /// Name of the repository; normalized before use
    #[arg(long, env = REPO_NAME_VAR)]
    pub repo_name: Option<String>,

    /// Full path of the group the repository is created in
    #[arg(long, env = GROUP_PATH_VAR)]
    pub group_path: Option<String>,

    /// Base URL of the GitLab instance
    #[arg(long, env = GITLAB_URL_VAR)]
    pub gitlab_url: Option<String>,

    /// Personal or project access token with the `api` scope
    #[arg(long, env = GITLAB_API_TOKEN_VAR, hide_env_values = true)]
    pub gitlab_api_token: Option<String>,

    /// Endpoint both webhooks deliver to
    #[arg(long, env = WEBHOOK_URL_VAR)]
    pub webhook_url: Option<String>,
}

impl Cli {
    /// The value given for an input, keyed by its environment variable name.
    pub fn value_of(&self, name: &str) -> Option<String> {
        let value = match name {
            BRANCHING_STRATEGY_VAR => &self.branching_strategy,
            REPO_NAME_VAR => &self.repo_name,
            GROUP_PATH_VAR => &self.group_path,
            GITLAB_URL_VAR => &self.gitlab_url,
            GITLAB_API_TOKEN_VAR => &self.gitlab_api_token,
            WEBHOOK_URL_VAR => &self.webhook_url,
            _ => return None,
        };
        value.clone()
    }

    /// Returns true for parse outcomes that are requests for help or version output
    /// rather than errors.
    pub fn is_informational(error: &clap::Error) -> bool {
        matches!(
            error.kind(),
            ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        )
    }

    /// Validates the collected inputs.
    pub fn configuration(&self) -> Result<Configuration, ConfigurationError> {
        Configuration::from_lookup(|name| self.value_of(name))
    }
}
