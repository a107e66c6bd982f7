//! Run configuration read from the process environment.
//!
//! [`Configuration`] is built once, before any call to GitLab is made. Building it
//! validates every required input and normalizes the repository name.

use std::sync::LazyLock;

use regex::Regex;
use secrecy::SecretString;
use tracing::info;
use url::Url;

use crate::errors::ConfigurationError;
use crate::strategy::BranchingStrategy;

#[cfg(test)]
#[path = "configuration_tests.rs"]
mod tests;

pub const BRANCHING_STRATEGY_VAR: &str = "BRANCHING_STRATEGY";
pub const REPO_NAME_VAR: &str = "REPO_NAME";
pub const GROUP_PATH_VAR: &str = "GROUP_PATH";
pub const GITLAB_URL_VAR: &str = "GITLAB_URL";
pub const GITLAB_API_TOKEN_VAR: &str = "GITLAB_API_TOKEN";
pub const WEBHOOK_URL_VAR: &str = "WEBHOOK_URL";

/// Endpoint both webhooks point at unless `WEBHOOK_URL` is set.
pub const DEFAULT_WEBHOOK_URL: &str = "https://example.com/rest/bitbucket/1.0/webhook/gitlab";

static INVALID_NAME_CHARACTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9-]").expect("pattern is a valid regex"));

/// Converts a requested repository name into the name the repository is created with.
///
/// Every character outside `[A-Za-z0-9-]` becomes `-` and the result is lowercased.
///
/// # Examples
///
/// ```rust
/// use repo_provisioner_core::normalize_repo_name;
///
/// assert_eq!(normalize_repo_name("My Repo_2!"), "my-repo-2-");
/// ```
pub fn normalize_repo_name(raw: &str) -> String {
    INVALID_NAME_CHARACTERS
        .replace_all(raw, "-")
        .to_lowercase()
}

/// Validated inputs for a single provisioning run.
///
/// The API token is held as a [`SecretString`] and never shows up in `Debug` output.
#[derive(Debug)]
pub struct Configuration {
    repo_name: String,
    branching_strategy: BranchingStrategy,
    group_path: String,
    platform_url: Url,
    api_token: SecretString,
    webhook_url: String,
}

impl Configuration {
    /// Reads and validates the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads and validates the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// Variables are checked in a fixed order (`BRANCHING_STRATEGY`, `REPO_NAME`,
    /// `GROUP_PATH`, `GITLAB_URL`, `GITLAB_API_TOKEN`) and the first problem found is
    /// returned. Empty values count as missing.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::MissingVariable` for an absent or empty required variable
    /// - `ConfigurationError::InvalidBranchingStrategy` for a strategy other than
    ///   `gitflow` or `trunk`
    /// - `ConfigurationError::InvalidUrl` if `GITLAB_URL` or `WEBHOOK_URL` does not parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value_of = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let required = |name: &str| value_of(name).ok_or_else(|| ConfigurationError::missing(name));

        let branching_strategy: BranchingStrategy = value_of(BRANCHING_STRATEGY_VAR)
            .ok_or_else(|| {
                ConfigurationError::missing_with_hint(
                    BRANCHING_STRATEGY_VAR,
                    "It must be either 'gitflow' or 'trunk'.",
                )
            })?
            .parse()?;

        let repo_name = normalize_repo_name(&required(REPO_NAME_VAR)?);
        let group_path = required(GROUP_PATH_VAR)?;
        let platform_url = parse_url(GITLAB_URL_VAR, &required(GITLAB_URL_VAR)?)?;
        let api_token = SecretString::from(required(GITLAB_API_TOKEN_VAR)?);

        let webhook_url = match value_of(WEBHOOK_URL_VAR) {
            Some(url) => {
                parse_url(WEBHOOK_URL_VAR, &url)?;
                url
            }
            None => DEFAULT_WEBHOOK_URL.to_string(),
        };

        info!(
            repo_name = %repo_name,
            branching_strategy = %branching_strategy,
            "Validated environment variables"
        );

        Ok(Self {
            repo_name,
            branching_strategy,
            group_path,
            platform_url,
            api_token,
            webhook_url,
        })
    }

    /// The normalized repository name.
    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    pub fn branching_strategy(&self) -> BranchingStrategy {
        self.branching_strategy
    }

    /// Full path of the group the repository is created in.
    pub fn group_path(&self) -> &str {
        &self.group_path
    }

    /// Base URL of the GitLab instance.
    pub fn platform_url(&self) -> &Url {
        &self.platform_url
    }

    pub fn api_token(&self) -> &SecretString {
        &self.api_token
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }
}

fn parse_url(name: &str, value: &str) -> Result<Url, ConfigurationError> {
    Url::parse(value).map_err(|e| ConfigurationError::invalid_url(name, e.to_string()))
}
