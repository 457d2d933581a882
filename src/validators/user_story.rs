//! User story format validator.

use std::sync::OnceLock;

use regex::Regex;

use super::{ValidationResult, Validator};
use crate::error::Result;

/// Default grammar: `As a|an <role> ... I want|need|would like <goal> ... so that <benefit>`.
pub const DEFAULT_PATTERN: &str =
    r"(?is)\bas\s+an?\s+\S.*?\bi\s+(?:want|need|would\s+like)\b\s*\S.*?\bso\s+that\b\s*\S";

const OK_MESSAGE: &str = "User Story - OK";
const FAILURE_MESSAGE: &str =
    "Invalid User Story format. Expected: 'As a <role>, I want <goal> so that <benefit>'";

static DEFAULT_REGEX: OnceLock<Regex> = OnceLock::new();

/// Checks that a description contains a user story sentence.
#[derive(Debug, Clone)]
pub struct UserStoryValidator {
    pattern: Regex,
    ok_message: String,
    failure_message: String,
}

impl Default for UserStoryValidator {
    fn default() -> Self {
        let pattern = DEFAULT_REGEX
            .get_or_init(|| {
                Regex::new(DEFAULT_PATTERN).expect("default user story pattern compiles")
            })
            .clone();
        Self::from_regex(pattern)
    }
}

impl UserStoryValidator {
    /// Validator using the default grammar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator using a custom regular expression.
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

    fn from_regex(pattern: Regex) -> Self {
        Self {
            pattern,
            ok_message: OK_MESSAGE.to_string(),
            failure_message: FAILURE_MESSAGE.to_string(),
        }
    }
}

impl Validator for UserStoryValidator {
    fn name(&self) -> &str {
        "user-story"
    }

    fn validate(&self, text: &str) -> ValidationResult {
        if self.pattern.is_match(text) {
            ValidationResult::valid(&self.ok_message)
        } else {
            ValidationResult::invalid(&self.failure_message)
        }
    }
}
