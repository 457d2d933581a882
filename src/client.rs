//! Jira HTTP client adapter.
//!
//! Low-level plumbing that performs authenticated GET requests. The
//! [`RestExecutor`] and [`ExecutorFactory`] traits are the seam the
//! [`JiraService`](crate::JiraService) talks through, so tests and host
//! environments can supply their own request executor.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::config::{Credentials, JiraConfig};
use crate::error::{JiraError, Result};

const USER_AGENT: &str = concat!("jiralint/", env!("CARGO_PKG_VERSION"));

/// A GET request relative to the Jira site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRequest {
    /// Path below the site URL, e.g. `/rest/api/3/project`.
    pub path: String,
    /// Query string pairs, in order.
    pub query: Vec<(String, String)>,
}

impl RestRequest {
    /// Create a GET request for `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Look up the first value of a query parameter.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A response the transport delivered without signalling an error.
///
/// `status` can be anything outside 4xx/5xx; deciding whether it is
/// acceptable is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    pub status: u16,
    pub body: String,
}

impl RestResponse {
    /// A `200 OK` response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// An empty response with the given status.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

/// Failures raised by the transport itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The server answered with a client or server error status.
    #[error("HTTP status {0}")]
    Status(u16),
    /// No response was received.
    #[error("{0}")]
    Connection(String),
}

/// Executes authenticated requests against Jira.
#[async_trait]
pub trait RestExecutor: Send + Sync {
    /// Send the request and hand back the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Status`] for 4xx/5xx answers and
    /// [`TransportError::Connection`] when no answer arrived.
    async fn exchange(
        &self,
        request: &RestRequest,
    ) -> core::result::Result<RestResponse, TransportError>;
}

/// Hands out pre-authenticated executors, one per call.
pub trait ExecutorFactory: Send + Sync {
    type Executor: RestExecutor;

    /// An executor authenticated as the add-on / service account.
    fn authenticated(&self) -> Self::Executor;
}

/// reqwest-backed Jira client.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use jiralint::{Credentials, JiraClient, JiraConfig};
///
/// # fn example() -> jiralint::Result<()> {
/// // Create from environment variables
/// let client = JiraClient::from_env()?;
///
/// // Or configure manually
/// let config = JiraConfig::new(
///     "https://acme.atlassian.net",
///     Credentials::Bearer("token".to_string()),
/// );
/// let client = JiraClient::new(&config)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct JiraClient {
    http: Client,
    base_url: Arc<Url>,
    credentials: Arc<Credentials>,
}

impl std::fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl JiraClient {
    /// Create a client from environment variables.
    ///
    /// See [`JiraConfig::from_env`] for the variables read.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete.
    pub fn from_env() -> Result<Self> {
        Self::new(&JiraConfig::from_env()?)
    }

    /// Create a new client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &JiraConfig) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout)
            .build()
            .map_err(|e| JiraError::Connection(e.to_string()))?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            credentials: Arc::new(config.credentials.clone()),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl RestExecutor for JiraClient {
    #[tracing::instrument(skip(self, request), fields(path = %request.path))]
    async fn exchange(
        &self,
        request: &RestRequest,
    ) -> core::result::Result<RestResponse, TransportError> {
        // Relative join keeps any context path of the site URL.
        let url = self
            .base_url
            .join(request.path.trim_start_matches('/'))
            .map_err(|e| TransportError::Connection(format!("invalid request URL: {e}")))?;

        let builder = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .query(&request.query);

        let builder = match self.credentials.as_ref() {
            Credentials::Basic { email, api_token } => builder.basic_auth(email, Some(api_token)),
            Credentials::Bearer(token) => builder.bearer_auth(token),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "received response");

        Ok(RestResponse {
            status: status.as_u16(),
            body,
        })
    }
}

impl ExecutorFactory for JiraClient {
    type Executor = JiraClient;

    fn authenticated(&self) -> JiraClient {
        self.clone()
    }
}
