//! Crate for interacting with the GitLab REST API.
//!
//! This crate provides a client for making authenticated requests to the `/api/v4`
//! endpoints of a GitLab instance, authenticating with a personal or project access
//! token sent in the `PRIVATE-TOKEN` header.
//!
//! The [`ProjectClient`] trait is the seam consumers program against; [`GitLabClient`] is
//! the `reqwest` backed implementation.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

pub mod errors;
pub use errors::Error;

pub mod approval_rule;
pub use approval_rule::{ApprovalRule, ApprovalRulePayload, ApprovalRuleType, ApprovalSettings};

pub mod branch_protection;
pub use branch_protection::{AccessLevel, BranchAccess, ProtectedBranch, ProtectedBranchPayload};

pub mod repository;
pub use repository::{
    Branch, BranchCreatePayload, Group, Project, ProjectCreatePayload, ProjectSettingsUpdate,
};

pub mod webhook;
pub use webhook::{ProjectHook, ProjectHookPayload};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Header GitLab reads access tokens from.
pub const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Trait for the project provisioning operations of the GitLab API.
#[async_trait]
pub trait ProjectClient: Send + Sync {
    /// Looks up a group by its full path (e.g. `platform/services`).
    ///
    /// # Errors
    /// Returns `Error::NotFound` if no group with that path is visible to the token.
    async fn get_group(&self, group_path: &str) -> Result<Group, Error>;

    /// Creates a project inside the namespace named in the payload.
    async fn create_project(&self, payload: &ProjectCreatePayload) -> Result<Project, Error>;

    /// Creates a branch from an existing ref.
    async fn create_branch(
        &self,
        project_id: u64,
        payload: &BranchCreatePayload,
    ) -> Result<Branch, Error>;

    /// Updates project attributes. Only the fields set in `settings` are changed.
    async fn update_project(
        &self,
        project_id: u64,
        settings: &ProjectSettingsUpdate,
    ) -> Result<Project, Error>;

    /// Removes the protection rule for a branch.
    ///
    /// # Errors
    /// Returns `Error::NotFound` if the branch has no protection rule.
    async fn delete_protected_branch(&self, project_id: u64, branch: &str) -> Result<(), Error>;

    /// Protects a branch or wildcard pattern.
    async fn protect_branch(
        &self,
        project_id: u64,
        payload: &ProtectedBranchPayload,
    ) -> Result<ProtectedBranch, Error>;

    /// Adds a hook to the project.
    async fn create_project_hook(
        &self,
        project_id: u64,
        payload: &ProjectHookPayload,
    ) -> Result<ProjectHook, Error>;

    /// Creates a project-level merge request approval rule.
    ///
    /// # Errors
    /// Returns `Error::UnexpectedStatus` if GitLab answers with anything other than
    /// `201 Created`.
    async fn create_approval_rule(
        &self,
        project_id: u64,
        payload: &ApprovalRulePayload,
    ) -> Result<ApprovalRule, Error>;

    /// Changes the project's merge request approval settings.
    async fn update_approval_settings(
        &self,
        project_id: u64,
        settings: &ApprovalSettings,
    ) -> Result<ApprovalSettings, Error>;
}

/// A client for the GitLab REST API, authenticated with an access token.
///
/// One client wraps one `reqwest::Client` and is meant to be shared by every call made
/// during a run.
#[derive(Debug)]
pub struct GitLabClient {
    http: reqwest::Client,
    api_base: Url,
    token: SecretString,
}

impl GitLabClient {
    /// Creates a new `GitLabClient` for the instance at `base_url`.
    ///
    /// `base_url` is the address of the GitLab instance (e.g. `https://gitlab.example.com`),
    /// not of its API; `/api/v4` is appended.
    ///
    /// # Errors
    /// Returns `Error::InvalidUrl` if the URL cannot carry a path, or `Error::Transport` if
    /// the HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gitlab_client::GitLabClient;
    /// use secrecy::SecretString;
    /// use url::Url;
    ///
    /// let base = Url::parse("https://gitlab.example.com").unwrap();
    /// let token = SecretString::from("glpat-example".to_string());
    /// let client = GitLabClient::new(&base, &token).unwrap();
    /// assert_eq!(client.api_base().as_str(), "https://gitlab.example.com/api/v4");
    /// ```
    pub fn new(base_url: &Url, token: &SecretString) -> Result<Self, Error> {
        let api_base = api_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("repo-provisioner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_base,
            token: SecretString::from(token.expose_secret().to_owned()),
        })
    }

    /// The `/api/v4` root all requests are made against.
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Builds an endpoint URL below the API root. Each segment is percent-encoded on its
    /// own, so a group path like `a/b` becomes the single segment `a%2Fb`.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends the request with the access token attached and turns non-success statuses
    /// into errors.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, Error> {
        let response = request
            .header(PRIVATE_TOKEN_HEADER, self.token.expose_secret())
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();
        debug!(
            status = status.as_u16(),
            path = url.path(),
            "GitLab API returned non-success status"
        );
        Err(Error::from_response(status.as_u16(), &body))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        let response = self.execute(request).await?;
        let body = read_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ProjectClient for GitLabClient {
    #[instrument(skip(self), fields(group_path = %group_path))]
    async fn get_group(&self, group_path: &str) -> Result<Group, Error> {
        let url = self.endpoint(&["groups", group_path])?;
        self.send_json(self.http.get(url)).await
    }

    #[instrument(skip(self, payload), fields(name = %payload.name, namespace_id = payload.namespace_id))]
    async fn create_project(&self, payload: &ProjectCreatePayload) -> Result<Project, Error> {
        let url = self.endpoint(&["projects"])?;
        self.send_json(self.http.post(url).json(payload)).await
    }

    #[instrument(skip(self, payload), fields(project_id = project_id, branch = %payload.branch))]
    async fn create_branch(
        &self,
        project_id: u64,
        payload: &BranchCreatePayload,
    ) -> Result<Branch, Error> {
        let id = project_id.to_string();
        let url = self.endpoint(&["projects", &id, "repository", "branches"])?;
        self.send_json(self.http.post(url).json(payload)).await
    }

    #[instrument(skip(self, settings), fields(project_id = project_id))]
    async fn update_project(
        &self,
        project_id: u64,
        settings: &ProjectSettingsUpdate,
    ) -> Result<Project, Error> {
        let id = project_id.to_string();
        let url = self.endpoint(&["projects", &id])?;
        self.send_json(self.http.put(url).json(settings)).await
    }

    #[instrument(skip(self), fields(project_id = project_id, branch = %branch))]
    async fn delete_protected_branch(&self, project_id: u64, branch: &str) -> Result<(), Error> {
        let id = project_id.to_string();
        let url = self.endpoint(&["projects", &id, "protected_branches", branch])?;
        self.execute(self.http.delete(url)).await?;
        Ok(())
    }

    #[instrument(skip(self, payload), fields(project_id = project_id, branch = %payload.name))]
    async fn protect_branch(
        &self,
        project_id: u64,
        payload: &ProtectedBranchPayload,
    ) -> Result<ProtectedBranch, Error> {
        let id = project_id.to_string();
        let url = self.endpoint(&["projects", &id, "protected_branches"])?;
        self.send_json(self.http.post(url).json(payload)).await
    }

    #[instrument(skip(self, payload), fields(project_id = project_id))]
    async fn create_project_hook(
        &self,
        project_id: u64,
        payload: &ProjectHookPayload,
    ) -> Result<ProjectHook, Error> {
        let id = project_id.to_string();
        let url = self.endpoint(&["projects", &id, "hooks"])?;
        self.send_json(self.http.post(url).json(payload)).await
    }

    #[instrument(skip(self, payload), fields(project_id = project_id, rule = %payload.name))]
    async fn create_approval_rule(
        &self,
        project_id: u64,
        payload: &ApprovalRulePayload,
    ) -> Result<ApprovalRule, Error> {
        let id = project_id.to_string();
        let url = self.endpoint(&["projects", &id, "approval_rules"])?;
        let response = self.execute(self.http.post(url).json(payload)).await?;

        let status = response.status();
        let body = read_body(response).await?;
        if status != StatusCode::CREATED {
            return Err(Error::UnexpectedStatus {
                expected: StatusCode::CREATED.as_u16(),
                actual: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    #[instrument(skip(self, settings), fields(project_id = project_id))]
    async fn update_approval_settings(
        &self,
        project_id: u64,
        settings: &ApprovalSettings,
    ) -> Result<ApprovalSettings, Error> {
        let id = project_id.to_string();
        let url = self.endpoint(&["projects", &id, "approvals"])?;
        self.send_json(self.http.post(url).json(settings)).await
    }
}

/// Derives the `/api/v4` root from the instance URL, keeping any path prefix the
/// instance is served under.
fn api_base_url(base_url: &Url) -> Result<Url, Error> {
    let mut api_base = base_url.clone();
    api_base.set_query(None);
    api_base.set_fragment(None);
    api_base
        .path_segments_mut()
        .map_err(|_| Error::InvalidUrl(base_url.to_string()))?
        .pop_if_empty()
        .extend(["api", "v4"]);
    Ok(api_base)
}

async fn read_body(response: Response) -> Result<String, Error> {
    response
        .text()
        .await
        .map_err(|e| Error::Transport(e.to_string()))
}
