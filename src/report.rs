//! Project evaluation: validate every issue description of a project.

use serde::Serialize;

use crate::client::ExecutorFactory;
use crate::error::Result;
use crate::models::Issue;
use crate::pagination::SearchParams;
use crate::service::JiraService;
use crate::validators::{AggregatedValidationResult, ValidatorService};

/// Which issues of a project to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintScope {
    /// A single search page.
    Page(SearchParams),
    /// Every issue, following pagination with `page_size` issues per request.
    All { page_size: u32 },
}

impl Default for LintScope {
    fn default() -> Self {
        LintScope::Page(SearchParams::default())
    }
}

/// Verdict for one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueReport {
    pub key: String,
    pub summary: String,
    pub result: AggregatedValidationResult,
}

/// Verdicts for the evaluated issues of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReport {
    pub project_key: String,
    /// Matching issues on the server; may exceed `issues.len()`.
    pub total: u64,
    pub issues: Vec<IssueReport>,
}

impl ProjectReport {
    /// Number of evaluated issues that passed every validator.
    pub fn passed(&self) -> usize {
        self.issues.iter().filter(|i| i.result.is_valid).count()
    }

    /// Number of evaluated issues with at least one failing validator.
    pub fn failed(&self) -> usize {
        self.issues.len() - self.passed()
    }

    /// Whether every evaluated issue passed.
    pub fn is_valid(&self) -> bool {
        self.failed() == 0
    }
}

/// Validate the descriptions of `issues`, keeping their order.
pub fn lint_issues<'a, I>(validators: &ValidatorService, issues: I) -> Vec<IssueReport>
where
    I: IntoIterator<Item = &'a Issue>,
{
    issues
        .into_iter()
        .map(|issue| IssueReport {
            key: issue.key.clone(),
            summary: issue.summary().to_string(),
            result: validators.validate(&issue.description_text()),
        })
        .collect()
}

/// Fetch the issues of a project and validate each description.
///
/// # Errors
///
/// Returns the error of the underlying issue search.
#[tracing::instrument(skip(service, validators))]
pub async fn lint_project<F: ExecutorFactory>(
    service: &JiraService<F>,
    validators: &ValidatorService,
    project_key: &str,
    scope: LintScope,
) -> Result<ProjectReport> {
    let (total, issues) = match scope {
        LintScope::Page(params) => {
            let page = service.search_issues(project_key, params).await?;
            (page.total, page.data)
        }
        LintScope::All { page_size } => {
            let issues = service.all_issues_paged(project_key, page_size).await?;
            (issues.len() as u64, issues)
        }
    };

    let report = ProjectReport {
        project_key: project_key.to_string(),
        total,
        issues: lint_issues(validators, &issues),
    };

    tracing::info!(
        evaluated = report.issues.len(),
        passed = report.passed(),
        failed = report.failed(),
        "project evaluated"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(key: &str, description: &str) -> Issue {
        serde_json::from_value(serde_json::json!({
            "id": "1",
            "key": key,
            "fields": {"summary": format!("summary of {key}"), "description": description}
        }))
        .unwrap()
    }

    #[test]
    fn test_lint_issues_keeps_order() {
        let validators = ValidatorService::default();
        let issues = vec![
            issue(
                "COV-1",
                "As a user, I want x so that y\n\nAcceptance Criteria\n- works",
            ),
            issue("COV-2", "just a note"),
        ];

        let reports = lint_issues(&validators, &issues);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].key, "COV-1");
        assert_eq!(reports[0].summary, "summary of COV-1");
        assert!(reports[0].result.is_valid);
        assert_eq!(reports[1].key, "COV-2");
        assert!(!reports[1].result.is_valid);
        assert_eq!(reports[1].result.messages.len(), 2);
        assert_eq!(reports[1].result.messages[1], "No Acceptance Criteria");
    }

    #[test]
    fn test_report_counts() {
        let validators = ValidatorService::default();
        let issues = vec![issue("A-1", "nope"), issue("A-2", "nope either")];
        let report = ProjectReport {
            project_key: "A".to_string(),
            total: 10,
            issues: lint_issues(&validators, &issues),
        };

        assert_eq!(report.passed(), 0);
        assert_eq!(report.failed(), 2);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report = ProjectReport {
            project_key: "A".to_string(),
            total: 0,
            issues: Vec::new(),
        };
        assert!(report.is_valid());
    }
}
