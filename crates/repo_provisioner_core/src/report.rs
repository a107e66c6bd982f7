//! Typed results of a provisioning run.
//!
//! Every configuration step produces a [`StepReport`]; the sequencer collects them into a
//! [`ProvisioningReport`] that is rendered as plain text at the end of the run.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::strategy::BranchingStrategy;

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// The stages of a provisioning run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ResolveGroup,
    CreateRepository,
    SeedBranch,
    SetDefaultBranch,
    ConfigureProtection,
    InstallWebhooks,
    ConfigureMergeSettings,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ResolveGroup => "Resolve group",
            Self::CreateRepository => "Create repository",
            Self::SeedBranch => "Seed branch",
            Self::SetDefaultBranch => "Set default branch",
            Self::ConfigureProtection => "Configure protection",
            Self::InstallWebhooks => "Install webhooks",
            Self::ConfigureMergeSettings => "Configure merge settings",
        };
        f.write_str(name)
    }
}

/// How a single step ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Succeeded { detail: String },
    /// Nothing needed doing.
    Skipped { reason: String },
    Failed { reason: String },
}

/// The result of one step of a stage, e.g. one protection rule or one webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub stage: Stage,
    /// What the step acted on: a branch name, a webhook, an approval rule.
    pub subject: String,
    pub outcome: StepOutcome,
}

impl StepReport {
    pub fn succeeded(stage: Stage, subject: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            stage,
            subject: subject.into(),
            outcome: StepOutcome::Succeeded {
                detail: detail.into(),
            },
        }
    }

    pub fn skipped(stage: Stage, subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            stage,
            subject: subject.into(),
            outcome: StepOutcome::Skipped {
                reason: reason.into(),
            },
        }
    }

    pub fn failed(stage: Stage, subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            stage,
            subject: subject.into(),
            outcome: StepOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, StepOutcome::Failed { .. })
    }
}

impl std::fmt::Display for StepReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            StepOutcome::Succeeded { detail } => {
                write!(f, "[ok]     {} ({}): {}", self.stage, self.subject, detail)
            }
            StepOutcome::Skipped { reason } => {
                write!(f, "[skip]   {} ({}): {}", self.stage, self.subject, reason)
            }
            StepOutcome::Failed { reason } => {
                write!(f, "[failed] {} ({}): {}", self.stage, self.subject, reason)
            }
        }
    }
}

/// Summary of a run that got past repository creation.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisioningReport {
    pub repo_name: String,
    pub group_path: String,
    pub branching_strategy: BranchingStrategy,
    pub project_id: u64,
    pub web_url: Option<String>,
    pub steps: Vec<StepReport>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ProvisioningReport {
    /// Steps that failed, in execution order.
    pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|s| s.is_failure())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Returns true if no step failed.
    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }

    /// Steps belonging to one stage.
    pub fn steps_for(&self, stage: Stage) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(move |s| s.stage == stage)
    }

    /// Wall-clock time the run took.
    pub fn duration(&self) -> Duration {
        self.finished_at - self.started_at
    }

    /// The closing line of the run.
    pub fn summary(&self) -> String {
        match self.failure_count() {
            0 => format!(
                "Repository '{}' created and configured successfully.",
                self.repo_name
            ),
            1 => format!(
                "Repository '{}' created; 1 configuration step failed.",
                self.repo_name
            ),
            n => format!(
                "Repository '{}' created; {} configuration steps failed.",
                self.repo_name, n
            ),
        }
    }
}

impl std::fmt::Display for ProvisioningReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Provisioning report for '{}' in '{}' ({})",
            self.repo_name, self.group_path, self.branching_strategy
        )?;
        if let Some(url) = &self.web_url {
            writeln!(f, "Project {}: {}", self.project_id, url)?;
        }
        for step in &self.steps {
            writeln!(f, "{step}")?;
        }
        writeln!(f, "Completed in {} ms", self.duration().num_milliseconds())?;
        write!(f, "{}", self.summary())
    }
}
