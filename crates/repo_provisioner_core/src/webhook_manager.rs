//! Webhook installation for new projects.
//!
//! This module provides the [`WebhookManager`] component, which subscribes the external
//! endpoint to push and merge request events.

use gitlab_client::{ProjectClient, ProjectHookPayload};
use tracing::{info, warn};

use crate::report::{Stage, StepReport};

#[cfg(test)]
#[path = "webhook_manager_tests.rs"]
mod tests;

/// Manages webhook installation for a project.
///
/// Two hooks are installed against the same URL: one for push events only and one for
/// merge request events only.
pub struct WebhookManager<'a> {
    client: &'a dyn ProjectClient,
}

impl<'a> WebhookManager<'a> {
    pub fn new(client: &'a dyn ProjectClient) -> Self {
        Self { client }
    }

    /// The hooks installed for every project, labelled for reporting.
    pub fn hooks_for(url: &str) -> Vec<(&'static str, ProjectHookPayload)> {
        vec![
            ("push events", ProjectHookPayload::push_only(url)),
            (
                "merge request events",
                ProjectHookPayload::merge_requests_only(url),
            ),
        ]
    }

    /// Installs both hooks.
    ///
    /// # Error Handling
    ///
    /// - A failed hook is logged and reported; the other hook is still installed
    /// - Webhook URLs are logged, nothing else about the request is
    pub async fn install(&self, project_id: u64, url: &str) -> Vec<StepReport> {
        let mut steps = Vec::new();

        for (label, hook) in Self::hooks_for(url) {
            match self.client.create_project_hook(project_id, &hook).await {
                Ok(created) => {
                    info!(hook_id = created.id, events = label, "Webhook added successfully: {}", hook.url);
                    steps.push(StepReport::succeeded(
                        Stage::InstallWebhooks,
                        label,
                        format!("installed for {}", hook.url),
                    ));
                }
                Err(e) => {
                    warn!(events = label, url = %hook.url, error = %e, "Error adding webhook");
                    steps.push(StepReport::failed(
                        Stage::InstallWebhooks,
                        label,
                        e.to_string(),
                    ));
                }
            }
        }

        steps
    }
}
