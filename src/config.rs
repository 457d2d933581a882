//! Jira connection configuration.
//!
//! Configuration is read from the environment:
//!
//! - `JIRA_BASE_URL` (required) - site URL, e.g. `https://acme.atlassian.net`
//! - `JIRA_EMAIL` + `JIRA_API_TOKEN` - basic credentials for a service account
//! - `JIRA_BEARER_TOKEN` - bearer credentials, used when no email is set
//! - `JIRA_TIMEOUT_SECS` (optional) - request timeout, defaults to 30 seconds

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::{JiraError, Result};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How requests authenticate against Jira.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Atlassian account email and API token.
    Basic { email: String, api_token: String },
    /// OAuth or personal access token.
    Bearer(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Basic { email, .. } => f
                .debug_struct("Basic")
                .field("email", email)
                .finish_non_exhaustive(),
            Credentials::Bearer(_) => f.write_str("Bearer(..)"),
        }
    }
}

/// Everything needed to build a [`JiraClient`](crate::JiraClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraConfig {
    pub base_url: String,
    pub credentials: Credentials,
    pub timeout: Duration,
}

impl JiraConfig {
    /// Create a configuration with the default timeout.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::ConfigMissing`] if the base URL or credentials are
    /// not set, or if `JIRA_TIMEOUT_SECS` is not a number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("JIRA_BASE_URL").ok_or_else(|| {
            JiraError::ConfigMissing("JIRA_BASE_URL environment variable not set".to_string())
        })?;

        let credentials = match (lookup("JIRA_EMAIL"), lookup("JIRA_API_TOKEN")) {
            (Some(email), Some(api_token)) => Credentials::Basic { email, api_token },
            (Some(_), None) => {
                return Err(JiraError::ConfigMissing(
                    "JIRA_API_TOKEN environment variable not set".to_string(),
                ))
            }
            (None, _) => lookup("JIRA_BEARER_TOKEN")
                .map(Credentials::Bearer)
                .ok_or_else(|| {
                    JiraError::ConfigMissing(
                        "set JIRA_EMAIL and JIRA_API_TOKEN, or JIRA_BEARER_TOKEN".to_string(),
                    )
                })?,
        };

        let timeout = match lookup("JIRA_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map(Duration::from_secs).map_err(|_| {
                JiraError::ConfigMissing(format!("JIRA_TIMEOUT_SECS must be a number, got '{raw}'"))
            })?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            base_url,
            credentials,
            timeout,
        })
    }
}
