//! Acceptance criteria presence validator.

use std::sync::OnceLock;

use regex::Regex;

use super::{ValidationResult, Validator};
use crate::error::Result;

/// Default heading: a line introducing "Acceptance Criteria", optionally
/// wrapped in markdown or wiki markup and followed by a colon.
pub const DEFAULT_HEADING_PATTERN: &str =
    r"(?im)^[ \t#*>_\-]*(?:h[1-6]\.[ \t]*)?acceptance[ \t]+criteri(?:a|on)\b[ \t:*_]*";

/// Under the default policy, Given/When/Then scenarios count as acceptance
/// criteria too.
const SCENARIO_PATTERN: &str = r"(?is)\bgiven\b.+?\bwhen\b.+?\bthen\b\s*\S";

const OK_MESSAGE: &str = "Acceptance Criteria - OK";
const FAILURE_MESSAGE: &str = "No Acceptance Criteria";

static DEFAULT_HEADING: OnceLock<Regex> = OnceLock::new();
static SCENARIO: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> Regex {
    cell.get_or_init(|| {
        Regex::new(pattern).expect("built-in acceptance criteria pattern compiles")
    })
    .clone()
}

/// Checks that a description carries acceptance criteria.
///
/// Passes when a heading match is followed by non-blank content. The default
/// policy also accepts a Given/When/Then scenario; a custom pattern replaces
/// both.
#[derive(Debug, Clone)]
pub struct AcceptanceCriteriaValidator {
    heading: Regex,
    scenario: Option<Regex>,
    ok_message: String,
    failure_message: String,
}

impl Default for AcceptanceCriteriaValidator {
    fn default() -> Self {
        Self {
            scenario: Some(compiled(&SCENARIO, SCENARIO_PATTERN)),
            ..Self::from_regex(compiled(&DEFAULT_HEADING, DEFAULT_HEADING_PATTERN))
        }
    }
}

impl AcceptanceCriteriaValidator {
    /// Validator using the default heading grammar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator using a custom heading pattern. Scenarios alone no longer
    /// pass.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::InvalidPattern`](crate::JiraError::InvalidPattern)
    /// if the pattern does not compile.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    /// Replace the messages reported on success and failure.
    #[must_use]
    pub fn with_messages(mut self, ok: impl Into<String>, failure: impl Into<String>) -> Self {
        self.ok_message = ok.into();
        self.failure_message = failure.into();
        self
    }

    fn from_regex(heading: Regex) -> Self {
        Self {
            heading,
            scenario: None,
            ok_message: OK_MESSAGE.to_string(),
            failure_message: FAILURE_MESSAGE.to_string(),
        }
    }

    fn has_criteria(&self, text: &str) -> bool {
        let under_heading = self
            .heading
            .find_iter(text)
            .any(|m| !text[m.end()..].trim().is_empty());

        under_heading || self.scenario.as_ref().is_some_and(|s| s.is_match(text))
    }
}

impl Validator for AcceptanceCriteriaValidator {
    fn name(&self) -> &str {
        "acceptance-criteria"
    }

    fn validate(&self, text: &str) -> ValidationResult {
        if self.has_criteria(text) {
            ValidationResult::valid(&self.ok_message)
        } else {
            ValidationResult::invalid(&self.failure_message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_with_content() {
        let validator = AcceptanceCriteriaValidator::new();
        let texts = [
            "As a user...\n\nAcceptance Criteria\n- can log in\n- sees dashboard",
            "## Acceptance criteria:\n1. works",
            "h3. Acceptance Criteria\n* first",
            "*Acceptance Criteria*: the page loads in under a second",
        ];

        for text in texts {
            let result = validator.validate(text);
            assert!(result.is_valid, "expected valid: {text:?}");
            assert_eq!(result.message, "Acceptance Criteria - OK");
        }
    }

    #[test]
    fn test_given_when_then() {
        let validator = AcceptanceCriteriaValidator::new();
        let text =
            "Scenario\nGiven a logged in user\nWhen they open the page\nThen the dashboard shows";
        assert!(validator.validate(text).is_valid);
    }

    #[test]
    fn test_missing_criteria() {
        let validator = AcceptanceCriteriaValidator::new();
        let texts = [
            "",
            "As a user, I want to log in so that I can work",
            "Acceptance Criteria\n\n   ",
            "We still need to write the acceptance criteria",
            "Given enough time, this will be done",
        ];

        for text in texts {
            let result = validator.validate(text);
            assert!(!result.is_valid, "expected invalid: {text:?}");
            assert_eq!(result.message, "No Acceptance Criteria");
        }
    }

    #[test]
    fn test_custom_pattern() {
        let validator = AcceptanceCriteriaValidator::with_pattern(r"(?im)^definition of done:?")
            .unwrap()
            .with_messages("DoD present", "DoD missing");

        assert_eq!(
            validator.validate("Definition of Done:\n- reviewed"),
            ValidationResult::valid("DoD present")
        );
        assert_eq!(
            validator.validate("Acceptance Criteria\n- x"),
            ValidationResult::invalid("DoD missing")
        );
    }

    #[test]
    fn test_custom_pattern_replaces_scenarios() {
        let validator =
            AcceptanceCriteriaValidator::with_pattern("(?im)^definition of done:").unwrap();
        let result = validator.validate("Given a user when they log in then it works");
        assert_eq!(result, ValidationResult::invalid("No Acceptance Criteria"));
    }
}
