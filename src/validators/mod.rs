//! Issue description validators.
//!
//! Each [`Validator`] judges one rule against a piece of text and reports
//! a [`ValidationResult`]. The [`ValidatorService`] runs a fixed, ordered set
//! of validators and folds their results into one verdict.

mod acceptance_criteria;
mod registry;
mod user_story;

use serde::{Deserialize, Serialize};

pub use acceptance_criteria::AcceptanceCriteriaValidator;
pub use registry::{AggregatedValidationResult, ValidatorService, ValidatorServiceBuilder};
pub use user_story::UserStoryValidator;

/// Outcome of a single validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
}

impl ValidationResult {
    /// A passing result.
    pub fn valid(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            message: message.into(),
        }
    }

    /// A failing result.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }
}

/// A stateless acceptance rule over text.
///
/// Implementations must not perform I/O or keep mutable state; the same
/// input always yields the same result.
pub trait Validator: Send + Sync {
    /// Stable identifier, e.g. `"user-story"`.
    fn name(&self) -> &str;

    /// Judge `text`.
    fn validate(&self, text: &str) -> ValidationResult;
}
