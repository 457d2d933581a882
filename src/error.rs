//! Error types for Jira operations.

use std::fmt;

use thiserror::Error;

use crate::client::TransportError;

/// The Jira operation a request was made for.
///
/// Its `Display` is the message surfaced when Jira answers with anything
/// other than `200 OK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `GET /rest/api/3/project`.
    GetProjects,
    /// `GET /rest/api/3/search`.
    SearchIssues,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::GetProjects => f.write_str("Error while getting projects"),
            Operation::SearchIssues => f.write_str("Error while searching issues"),
        }
    }
}

/// Errors that can occur during Jira operations.
#[derive(Debug, Error)]
pub enum JiraError {
    /// Configuration is missing or incomplete.
    #[error("Jira configuration required: {0}")]
    ConfigMissing(String),

    /// The request went through but Jira did not answer `200 OK`.
    #[error("{operation}")]
    UnexpectedStatus { operation: Operation, status: u16 },

    /// The HTTP layer itself reported an error status (4xx/5xx).
    #[error("Error while making a request to Jira. Response status code: '{status_code}'")]
    RequestFailed { status_code: u16 },

    /// No HTTP status was received at all (DNS, refused connection, timeout).
    #[error("Error while making a request to Jira: {0}")]
    Connection(String),

    /// Invalid project key.
    #[error("Invalid project key '{0}'")]
    InvalidProjectKey(String),

    /// A validator pattern failed to compile.
    #[error("Invalid validation pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Local I/O error (reading input).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl JiraError {
    /// The HTTP status behind this error, if there was one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            JiraError::UnexpectedStatus { status, .. } => Some(*status),
            JiraError::RequestFailed { status_code } => Some(*status_code),
            _ => None,
        }
    }
}

impl From<TransportError> for JiraError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status(status_code) => JiraError::RequestFailed { status_code },
            TransportError::Connection(message) => JiraError::Connection(message),
        }
    }
}

/// Result type alias for Jira operations.
pub type Result<T> = core::result::Result<T, JiraError>;
