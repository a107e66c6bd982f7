//! GitLab project hook types.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;

/// Payload for `POST /projects/:id/hooks`.
///
/// GitLab subscribes a hook to push events unless told otherwise, so both event flags are
/// always sent.
///
/// # Examples
///
/// ```rust
/// use gitlab_client::ProjectHookPayload;
///
/// let hook = ProjectHookPayload::push_only("https://example.com/webhook");
/// assert!(hook.push_events);
/// assert!(!hook.merge_requests_events);
/// assert!(hook.enable_ssl_verification);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectHookPayload {
    /// Hook URL
    pub url: String,

    pub push_events: bool,

    pub merge_requests_events: bool,

    pub enable_ssl_verification: bool,
}

impl ProjectHookPayload {
    /// A hook that fires on pushes only.
    pub fn push_only(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            push_events: true,
            merge_requests_events: false,
            enable_ssl_verification: true,
        }
    }

    /// A hook that fires on merge request events only.
    pub fn merge_requests_only(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            push_events: false,
            merge_requests_events: true,
            enable_ssl_verification: true,
        }
    }
}

/// A project hook as returned by GitLab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectHook {
    /// GitLab-assigned hook ID
    pub id: u64,

    pub url: String,

    #[serde(default)]
    pub push_events: bool,

    #[serde(default)]
    pub merge_requests_events: bool,

    #[serde(default)]
    pub enable_ssl_verification: bool,
}
