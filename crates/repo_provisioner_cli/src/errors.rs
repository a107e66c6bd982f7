use std::io;

use repo_provisioner_core::{ConfigurationError, ProvisionerError};
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that end a `repo-provisioner` run.
///
/// Every variant is fatal. Failures of individual configuration steps are not errors;
/// they are part of the printed report.
#[derive(Error, Debug)]
pub enum Error {
    /// The command line or an environment fallback could not be parsed.
    #[error("{0}")]
    Arguments(#[from] clap::Error),

    /// A required input is missing or invalid. Nothing was sent to GitLab.
    #[error("{0}")]
    Configuration(#[from] ConfigurationError),

    /// The GitLab client could not be built from the configured URL.
    #[error("Failed to set up the GitLab client: {0}")]
    Client(#[from] gitlab_client::Error),

    /// The group could not be resolved or the repository could not be created.
    #[error("{0}")]
    Provisioning(ProvisionerError),

    /// The async runtime could not be started.
    #[error("Failed to start the async runtime: {0}")]
    Runtime(io::Error),
}

impl From<ProvisionerError> for Error {
    fn from(e: ProvisionerError) -> Self {
        match e {
            ProvisionerError::Configuration(inner) => Self::Configuration(inner),
            other => Self::Provisioning(other),
        }
    }
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
