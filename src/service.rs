//! Jira query service.
//!
//! Wraps an [`ExecutorFactory`] and turns raw Jira responses into typed
//! results. Exactly one outcome counts as success: a `200 OK` whose body
//! decodes. Any other status the transport lets through becomes
//! [`JiraError::UnexpectedStatus`], and an error status raised by the
//! transport becomes [`JiraError::RequestFailed`]. Nothing is retried or cached.

use serde::de::DeserializeOwned;

use crate::client::{ExecutorFactory, RestExecutor, RestRequest};
use crate::error::{JiraError, Operation, Result};
use crate::models::{Issue, IssueSearch, Project};
use crate::pagination::{Page, SearchParams, DEFAULT_MAX_RESULTS};

/// Endpoint listing all projects visible to the caller.
pub const PROJECTS_PATH: &str = "/rest/api/3/project";

/// Endpoint for JQL issue searches.
pub const SEARCH_PATH: &str = "/rest/api/3/search";

/// Issue fields requested by searches.
pub const SEARCH_FIELDS: &str = "summary,description,status,issuetype,created,updated";

/// Maximum pages fetched by [`JiraService::all_issues`] (safety limit).
const MAX_PAGES: u32 = 1000;

/// Projects and issues, fetched through an authenticated executor.
///
/// # Example
///
/// ```no_run
/// use jiralint::{JiraClient, JiraService};
///
/// # async fn example() -> jiralint::Result<()> {
/// let service = JiraService::new(JiraClient::from_env()?);
///
/// for project in service.projects().await? {
///     let page = service.issues(&project.key).await?;
///     println!("{}: {} issues", project.key, page.total);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JiraService<F> {
    clients: F,
}

impl<F: ExecutorFactory> JiraService<F> {
    /// Create a service that obtains executors from `clients`.
    pub fn new(clients: F) -> Self {
        Self { clients }
    }

    /// List all projects.
    ///
    /// # Errors
    ///
    /// Fails with "Error while getting projects" on any status other than
    /// 200, and with [`JiraError::RequestFailed`] on transport errors.
    #[tracing::instrument(skip(self))]
    pub async fn projects(&self) -> Result<Vec<Project>> {
        let request = RestRequest::get(PROJECTS_PATH);
        self.exchange(&request, Operation::GetProjects).await
    }

    /// First page of issues for a project.
    ///
    /// # Errors
    ///
    /// See [`JiraService::search_issues`].
    pub async fn issues(&self, project_key: &str) -> Result<Page<Issue>> {
        self.search_issues(project_key, SearchParams::default()).await
    }

    /// One page of issues for a project.
    ///
    /// # Errors
    ///
    /// Fails with [`JiraError::InvalidProjectKey`] for a blank key, with
    /// "Error while searching issues" on any status other than 200, and with
    /// [`JiraError::RequestFailed`] on transport errors.
    #[tracing::instrument(skip(self))]
    pub async fn search_issues(
        &self,
        project_key: &str,
        params: SearchParams,
    ) -> Result<Page<Issue>> {
        let request = search_request(project_key, params)?;
        let search: IssueSearch = self.exchange(&request, Operation::SearchIssues).await?;

        // Offsets Jira leaves out are the ones that were asked for.
        let start_at = search.start_at.unwrap_or(params.start_at);
        let max_results = search
            .max_results
            .unwrap_or_else(|| u64::from(params.max_results));
        Ok(Page::new(search.issues, search.total, start_at, max_results))
    }

    /// Every issue of a project, following pagination.
    ///
    /// # Errors
    ///
    /// Returns the first error any page request fails with.
    pub async fn all_issues(&self, project_key: &str) -> Result<Vec<Issue>> {
        self.all_issues_paged(project_key, DEFAULT_MAX_RESULTS).await
    }

    /// Every issue of a project, requesting `page_size` issues per page.
    ///
    /// The offset advances by the number of issues each page returned;
    /// the walk stops at `total` or on the first empty page.
    ///
    /// # Errors
    ///
    /// Returns the first error any page request fails with.
    #[tracing::instrument(skip(self))]
    pub async fn all_issues_paged(
        &self,
        project_key: &str,
        page_size: u32,
    ) -> Result<Vec<Issue>> {
        let mut all_items = Vec::new();
        let mut params = SearchParams::starting_at(0, page_size);
        let mut pages = 0;

        loop {
            let page = self.search_issues(project_key, params).await?;
            let fetched = page.len() as u64;
            let total = page.total;
            all_items.extend(page.data);
            params.start_at += fetched;

            if fetched == 0 || params.start_at >= total {
                break;
            }

            pages += 1;
            if pages >= MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all_items)
    }

    async fn exchange<T: DeserializeOwned>(
        &self,
        request: &RestRequest,
        operation: Operation,
    ) -> Result<T> {
        let executor = self.clients.authenticated();

        let response = executor.exchange(request).await.map_err(|e| {
            tracing::warn!(path = %request.path, error = %e, "Jira request failed");
            JiraError::from(e)
        })?;

        if response.status != 200 {
            tracing::warn!(
                path = %request.path,
                status = response.status,
                "Unexpected Jira response status"
            );
            return Err(JiraError::UnexpectedStatus {
                operation,
                status: response.status,
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}

/// Build the search request for a project.
fn search_request(project_key: &str, params: SearchParams) -> Result<RestRequest> {
    let key = project_key.trim();
    if key.is_empty() {
        return Err(JiraError::InvalidProjectKey(project_key.to_string()));
    }

    Ok(RestRequest::get(SEARCH_PATH)
        .query("jql", project_jql(key))
        .query("startAt", params.start_at)
        .query("maxResults", params.max_results)
        .query("fields", SEARCH_FIELDS))
}

/// JQL selecting every issue of a project, in key order.
pub fn project_jql(project_key: &str) -> String {
    let escaped = project_key.replace('\\', "\\\\").replace('"', "\\\"");
    format!("project = \"{escaped}\" ORDER BY key ASC")
}
