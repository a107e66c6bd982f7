//! Error types for GitLab client operations.
//!
//! This module defines the error types that can occur when interacting with the GitLab
//! REST API through the gitlab_client crate. Non-success responses are translated into
//! the variants below, carrying the message GitLab put in the response body.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitLab client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use gitlab_client::Error;
///
/// match client.get_group("platform/services").await {
///     Ok(group) => println!("Group found: {}", group.id),
///     Err(Error::NotFound) => eprintln!("Group does not exist"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// GitLab rejected the request with a non-success status.
    ///
    /// The message is taken from the `message` or `error` field of the response body,
    /// falling back to the raw body text.
    #[error("GitLab API request failed with status {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Error deserializing the response from GitLab.
    #[error("Failed to deserialize GitLab response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The configured base URL cannot be used to build API endpoints.
    #[error("Invalid GitLab URL: {0}")]
    InvalidUrl(String),

    /// The requested resource was not found.
    ///
    /// Returned for HTTP 404 responses, e.g. when a group path does not exist or a branch
    /// has no protection rule.
    #[error("Resource not found")]
    NotFound,

    /// The request could not be sent or the response could not be read.
    #[error("Failed to communicate with GitLab: {0}")]
    Transport(String),

    /// The token was rejected or lacks the permissions for the operation (HTTP 401/403).
    #[error("GitLab rejected the credentials: {0}")]
    Unauthorized(String),

    /// The request succeeded but not with the status the endpoint must answer with.
    #[error("Unexpected response status {actual} (expected {expected}): {body}")]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        body: String,
    },
}

impl Error {
    /// Builds the error for a non-success response from its status code and body text.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_error_message(body);
        match status {
            401 | 403 => Error::Unauthorized(message),
            404 => Error::NotFound,
            _ => Error::ApiError { status, message },
        }
    }

    /// Returns true when the error is a 404 from GitLab.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}

/// Pulls the human readable message out of a GitLab error body.
///
/// GitLab answers with `{"message": "..."}`, `{"message": {"field": ["..."]}}` or
/// `{"error": "..."}` depending on the endpoint.
pub(crate) fn extract_error_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no response body".to_string();
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => match value.get("message").or_else(|| value.get("error")) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => trimmed.to_string(),
        },
        Err(_) => trimmed.to_string(),
    }
}
