//! Recording mock of [`ProjectClient`] shared by the unit tests of this crate.

use async_trait::async_trait;
use gitlab_client::{
    ApprovalRule, ApprovalRulePayload, ApprovalSettings, Branch, BranchCreatePayload,
    Error as GitLabError, Group, Project, ProjectClient, ProjectCreatePayload, ProjectHook,
    ProjectHookPayload, ProjectSettingsUpdate, ProtectedBranch, ProtectedBranchPayload,
};
use std::sync::Mutex;

pub(crate) const MOCK_GROUP_ID: u64 = 42;
pub(crate) const MOCK_PROJECT_ID: u64 = 1001;

/// One call made against the mock, with the payload it carried.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    GetGroup(String),
    CreateProject(ProjectCreatePayload),
    CreateBranch(BranchCreatePayload),
    UpdateProject(ProjectSettingsUpdate),
    DeleteProtectedBranch(String),
    ProtectBranch(ProtectedBranchPayload),
    CreateProjectHook(ProjectHookPayload),
    CreateApprovalRule(ApprovalRulePayload),
    UpdateApprovalSettings(ApprovalSettings),
}

type CallMatcher = Box<dyn Fn(&Call) -> bool + Send + Sync>;

/// Mock client that records every call and fails the ones matching configured rules.
#[derive(Default)]
pub(crate) struct MockProjectClient {
    calls: Mutex<Vec<Call>>,
    failures: Vec<(CallMatcher, fn() -> GitLabError)>,
}

impl MockProjectClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes every call matching `matcher` fail with the error built by `error`.
    pub(crate) fn failing_when(
        mut self,
        matcher: impl Fn(&Call) -> bool + Send + Sync + 'static,
        error: fn() -> GitLabError,
    ) -> Self {
        self.failures.push((Box::new(matcher), error));
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), GitLabError> {
        let failure = self
            .failures
            .iter()
            .find(|(matcher, _)| matcher(&call))
            .map(|(_, error)| error());
        self.calls.lock().unwrap().push(call);
        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn project(name: &str) -> Project {
        Project {
            id: MOCK_PROJECT_ID,
            name: name.to_string(),
            path_with_namespace: format!("platform/{name}"),
            web_url: Some(format!("https://gitlab.example.com/platform/{name}")),
            default_branch: None,
        }
    }
}

pub(crate) fn server_error() -> GitLabError {
    GitLabError::ApiError {
        status: 500,
        message: "500 Internal Server Error".to_string(),
    }
}

pub(crate) fn not_found() -> GitLabError {
    GitLabError::NotFound
}

#[async_trait]
impl ProjectClient for MockProjectClient {
    async fn get_group(&self, group_path: &str) -> Result<Group, GitLabError> {
        self.record(Call::GetGroup(group_path.to_string()))?;
        Ok(Group {
            id: MOCK_GROUP_ID,
            name: "Platform".to_string(),
            full_path: group_path.to_string(),
        })
    }

    async fn create_project(&self, payload: &ProjectCreatePayload) -> Result<Project, GitLabError> {
        self.record(Call::CreateProject(payload.clone()))?;
        Ok(Self::project(&payload.name))
    }

    async fn create_branch(
        &self,
        _project_id: u64,
        payload: &BranchCreatePayload,
    ) -> Result<Branch, GitLabError> {
        self.record(Call::CreateBranch(payload.clone()))?;
        Ok(Branch {
            name: payload.branch.clone(),
            protected: false,
            default: false,
        })
    }

    async fn update_project(
        &self,
        _project_id: u64,
        settings: &ProjectSettingsUpdate,
    ) -> Result<Project, GitLabError> {
        self.record(Call::UpdateProject(settings.clone()))?;
        Ok(Self::project("mock"))
    }

    async fn delete_protected_branch(
        &self,
        _project_id: u64,
        branch: &str,
    ) -> Result<(), GitLabError> {
        self.record(Call::DeleteProtectedBranch(branch.to_string()))
    }

    async fn protect_branch(
        &self,
        _project_id: u64,
        payload: &ProtectedBranchPayload,
    ) -> Result<ProtectedBranch, GitLabError> {
        self.record(Call::ProtectBranch(payload.clone()))?;
        Ok(ProtectedBranch {
            id: 1,
            name: payload.name.clone(),
            push_access_levels: Vec::new(),
            merge_access_levels: Vec::new(),
            allow_force_push: payload.allow_force_push,
            code_owner_approval_required: payload.code_owner_approval_required,
        })
    }

    async fn create_project_hook(
        &self,
        _project_id: u64,
        payload: &ProjectHookPayload,
    ) -> Result<ProjectHook, GitLabError> {
        self.record(Call::CreateProjectHook(payload.clone()))?;
        Ok(ProjectHook {
            id: 7,
            url: payload.url.clone(),
            push_events: payload.push_events,
            merge_requests_events: payload.merge_requests_events,
            enable_ssl_verification: payload.enable_ssl_verification,
        })
    }

    async fn create_approval_rule(
        &self,
        _project_id: u64,
        payload: &ApprovalRulePayload,
    ) -> Result<ApprovalRule, GitLabError> {
        self.record(Call::CreateApprovalRule(payload.clone()))?;
        Ok(ApprovalRule {
            id: 5,
            name: payload.name.clone(),
            approvals_required: payload.approvals_required,
            rule_type: Some("regular".to_string()),
        })
    }

    async fn update_approval_settings(
        &self,
        _project_id: u64,
        settings: &ApprovalSettings,
    ) -> Result<ApprovalSettings, GitLabError> {
        self.record(Call::UpdateApprovalSettings(settings.clone()))?;
        Ok(settings.clone())
    }
}
