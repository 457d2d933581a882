//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::report::ProjectReport;
use crate::validators::AggregatedValidationResult;

/// Trait for human-readable key-value output.
///
/// Implemented by validation results and project reports to provide
/// formatted output suitable for terminal display when `--json` is not
/// specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for AggregatedValidationResult {
    fn pretty_print(&self) -> String {
        let verdict = if self.is_valid { "PASS" } else { "FAIL" };
        let mut lines = vec![format!("Result:         {}", verdict)];
        lines.extend(self.messages.iter().map(|m| format!("  - {}", m)));
        lines.join("\n")
    }
}

impl PrettyPrint for ProjectReport {
    fn pretty_print(&self) -> String {
        let header = format!("Project: {}", self.project_key);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider.clone(),
            format!(
                "Evaluated:      {} of {} issues ({} passed, {} failed)",
                self.issues.len(),
                self.total,
                self.passed(),
                self.failed()
            ),
        ];

        for issue in &self.issues {
            lines.push(divider.clone());
            lines.push(format!("{}  {}", issue.key, issue.summary));
            lines.push(issue.result.pretty_print());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::IssueReport;

    #[test]
    fn test_result_pretty_print() {
        let result = AggregatedValidationResult {
            is_valid: false,
            messages: vec![
                "User Story - OK".to_string(),
                "No Acceptance Criteria".to_string(),
            ],
        };
        let output = result.pretty_print();
        assert!(output.contains("FAIL"));
        assert!(output.contains("  - User Story - OK"));
        assert!(output.contains("  - No Acceptance Criteria"));
    }

    #[test]
    fn test_report_pretty_print_summarizes() {
        let report = ProjectReport {
            project_key: "COV".to_string(),
            total: 202,
            issues: vec![IssueReport {
                key: "COV-1".to_string(),
                summary: "First".to_string(),
                result: AggregatedValidationResult {
                    is_valid: true,
                    messages: vec!["ok".to_string()],
                },
            }],
        };

        let output = report.pretty_print();
        assert!(output.contains("1 of 202 issues (1 passed, 0 failed)"));
        assert!(output.contains("COV-1  First"));
        assert!(output.contains("PASS"));
    }
}
