//! Jira Cloud client and issue description linter.
//!
//! Fetches projects and issues from the Jira Cloud REST API and runs a set
//! of text validators (user story format, acceptance criteria presence)
//! over issue descriptions, folding their results into one verdict.
//!
//! # Quick Start
//!
//! ```no_run
//! use jiralint::{JiraClient, JiraService, ValidatorService};
//!
//! #[tokio::main]
//! async fn main() -> jiralint::Result<()> {
//!     // Create client from environment variables
//!     let service = JiraService::new(JiraClient::from_env()?);
//!     let validators = ValidatorService::default();
//!
//!     // List all projects
//!     let projects = service.projects().await?;
//!     println!("Found {} projects", projects.len());
//!
//!     // Validate the first page of issues of a project
//!     let page = service.issues("COV").await?;
//!     for issue in &page {
//!         let result = validators.validate(&issue.description_text());
//!         println!("{}: {} {:?}", issue.key, result.is_valid, result.messages);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`JiraClient`] performs authenticated GET requests. It implements
//!   [`RestExecutor`] and [`ExecutorFactory`], the seam through which
//!   [`JiraService`] obtains one executor per call.
//! - [`JiraService`] maps responses into typed results: only `200 OK`
//!   succeeds, everything else becomes a [`JiraError`].
//! - [`ValidatorService`] runs every registered [`Validator`] in
//!   registration order and aggregates their verdicts.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `JIRA_BASE_URL` (required) - Site URL, e.g. `https://acme.atlassian.net`
//! - `JIRA_EMAIL` and `JIRA_API_TOKEN` - Basic credentials
//! - `JIRA_BEARER_TOKEN` - Bearer credentials, used when no email is set
//! - `JIRA_TIMEOUT_SECS` (optional) - Request timeout in seconds (default 30)

mod client;
mod config;
mod error;
mod models;
mod pagination;
mod service;

pub mod cli;
pub mod output;
pub mod report;
pub mod validators;

// Re-export core types
pub use client::{
    ExecutorFactory, JiraClient, RestExecutor, RestRequest, RestResponse, TransportError,
};
pub use config::{Credentials, JiraConfig, DEFAULT_TIMEOUT};
pub use error::{JiraError, Operation, Result};
pub use pagination::{Page, SearchParams, DEFAULT_MAX_RESULTS};
pub use service::{project_jql, JiraService, PROJECTS_PATH, SEARCH_FIELDS, SEARCH_PATH};

// Re-export models
pub use models::adf::description_to_text;
pub use models::{Issue, IssueFields, IssueSearch, NamedField, Project};

// Re-export validators
pub use validators::{
    AcceptanceCriteriaValidator, AggregatedValidationResult, UserStoryValidator, ValidationResult,
    Validator, ValidatorService,
};
