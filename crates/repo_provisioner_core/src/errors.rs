//! Error types for repository provisioning.
//!
//! [`ConfigurationError`] covers invalid or missing inputs; [`ProvisionerError`] covers the
//! failures that abort a run. Failures of the configuration steps that follow repository
//! creation are not errors at this level: they are recorded in the run report.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised while reading and validating the run configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("{name} is not set.{hint}")]
    MissingVariable { name: String, hint: String },

    #[error("Invalid BRANCHING_STRATEGY value. It must be either 'gitflow' or 'trunk'.")]
    InvalidBranchingStrategy { value: String },

    #[error("{name} is not a valid URL: {reason}")]
    InvalidUrl { name: String, reason: String },
}

impl ConfigurationError {
    /// A required variable is absent or empty.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingVariable {
            name: name.into(),
            hint: String::new(),
        }
    }

    /// A required variable is absent or empty, with a sentence telling the user what is
    /// expected.
    pub fn missing_with_hint(name: impl Into<String>, hint: impl AsRef<str>) -> Self {
        Self::MissingVariable {
            name: name.into(),
            hint: format!(" {}", hint.as_ref()),
        }
    }

    pub fn invalid_url(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that abort a provisioning run.
#[derive(Error, Debug)]
pub enum ProvisionerError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Group '{path}' not found.")]
    GroupNotFound { path: String },

    #[error("Failed to look up group '{path}': {reason}")]
    GroupLookupFailed { path: String, reason: String },

    #[error("Error creating repository '{name}': {reason}")]
    RepositoryCreationFailed { name: String, reason: String },
}

/// Result type alias for provisioning operations.
pub type ProvisionerResult<T> = Result<T, ProvisionerError>;
