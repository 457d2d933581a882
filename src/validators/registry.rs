//! Validator registry.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AcceptanceCriteriaValidator, UserStoryValidator, ValidationResult, Validator};

/// Combined verdict of every registered validator.
///
/// `messages` holds one entry per validator, in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedValidationResult {
    pub is_valid: bool,
    pub messages: Vec<String>,
}

impl AggregatedValidationResult {
    /// Fold individual results, keeping their order.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = ValidationResult>,
    {
        let mut is_valid = true;
        let mut messages = Vec::new();

        for result in results {
            is_valid &= result.is_valid;
            messages.push(result.message);
        }

        Self { is_valid, messages }
    }
}

/// Runs an ordered, fixed set of validators against text.
///
/// The set is built once (usually at startup) and never changes afterwards,
/// so a service can be shared freely between concurrent requests.
///
/// # Example
///
/// ```
/// use jiralint::{AcceptanceCriteriaValidator, UserStoryValidator, ValidatorService};
///
/// let service = ValidatorService::builder()
///     .register(UserStoryValidator::new())
///     .register(AcceptanceCriteriaValidator::new())
///     .build();
///
/// let result = service.validate("As a user, I want to log in so that I can work");
/// assert!(!result.is_valid);
/// assert_eq!(result.messages.len(), 2);
/// ```
pub struct ValidatorService {
    validators: Vec<Box<dyn Validator>>,
}

impl fmt::Debug for ValidatorService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorService")
            .field("validators", &self.names())
            .finish()
    }
}

impl Default for ValidatorService {
    /// User story validator first, then acceptance criteria.
    fn default() -> Self {
        Self::builder()
            .register(UserStoryValidator::new())
            .register(AcceptanceCriteriaValidator::new())
            .build()
    }
}

impl ValidatorService {
    /// Start an empty registration list.
    pub fn builder() -> ValidatorServiceBuilder {
        ValidatorServiceBuilder::default()
    }

    /// Registered validators, in registration order.
    pub fn validators(&self) -> &[Box<dyn Validator>] {
        &self.validators
    }

    /// Names of the registered validators, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns true if no validator is registered.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run every validator against `text`.
    ///
    /// All validators run, even after one has failed, so the result always
    /// carries one message per validator. An empty registry yields a valid
    /// result with no messages.
    pub fn validate(&self, text: &str) -> AggregatedValidationResult {
        AggregatedValidationResult::from_results(self.validators.iter().map(|validator| {
            let result = validator.validate(text);
            tracing::debug!(
                validator = validator.name(),
                is_valid = result.is_valid,
                "validator finished"
            );
            result
        }))
    }
}

/// Collects validators for a [`ValidatorService`].
#[derive(Default)]
pub struct ValidatorServiceBuilder {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidatorServiceBuilder {
    /// Append a validator. It runs after every validator registered before it.
    #[must_use]
    pub fn register<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Append an already boxed validator.
    #[must_use]
    pub fn register_boxed(mut self, validator: Box<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Freeze the registration list.
    pub fn build(self) -> ValidatorService {
        tracing::debug!(count = self.validators.len(), "validators registered");
        ValidatorService {
            validators: self.validators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Always returns the same result and counts its calls.
    struct Fixed {
        name: &'static str,
        result: ValidationResult,
        calls: Arc<AtomicUsize>,
    }

    impl Fixed {
        fn new(name: &'static str, is_valid: bool, message: &str) -> Self {
            Self {
                name,
                result: ValidationResult {
                    is_valid,
                    message: message.to_string(),
                },
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl Validator for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn validate(&self, _text: &str) -> ValidationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    #[test]
    fn test_default_registers_both_validators() {
        let service = ValidatorService::default();
        assert_eq!(service.len(), 2);
        assert_eq!(service.names(), vec!["user-story", "acceptance-criteria"]);
    }

    #[test]
    fn test_all_pass() {
        let service = ValidatorService::builder()
            .register(Fixed::new("a", true, "User Story - OK"))
            .register(Fixed::new("b", true, "Acceptance Criteria - OK"))
            .build();

        let result = service.validate("mocked validators");
        assert!(result.is_valid);
        assert_eq!(result.messages, vec!["User Story - OK", "Acceptance Criteria - OK"]);
    }

    #[test]
    fn test_one_failure_fails_the_whole() {
        let service = ValidatorService::builder()
            .register(Fixed::new("a", true, "A-OK"))
            .register(Fixed::new("b", false, "B-fail"))
            .build();

        assert_eq!(
            service.validate("anything"),
            AggregatedValidationResult {
                is_valid: false,
                messages: vec!["A-OK".to_string(), "B-fail".to_string()],
            }
        );
    }

    #[test]
    fn test_failure_does_not_stop_later_validators() {
        let first = Fixed::new("first", false, "first failed");
        let second = Fixed::new("second", true, "second ran");
        let second_calls = second.calls.clone();

        let service = ValidatorService::builder()
            .register(first)
            .register(second)
            .build();

        let result = service.validate("text");
        assert!(!result.is_valid);
        assert_eq!(result.messages, vec!["first failed", "second ran"]);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_order_follows_registration() {
        let service = ValidatorService::builder()
            .register(Fixed::new("z", true, "z"))
            .register_boxed(Box::new(Fixed::new("a", true, "a")))
            .register(Fixed::new("m", false, "m"))
            .build();

        assert_eq!(service.names(), vec!["z", "a", "m"]);
        assert_eq!(service.validate("x").messages, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_empty_registry_is_valid() {
        let service = ValidatorService::builder().build();
        let result = service.validate("anything");
        assert!(service.is_empty());
        assert!(result.is_valid);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let service = ValidatorService::default();
        let text = "As a user, I want x so that y\n\nAcceptance Criteria\n- z";
        let first = service.validate(text);
        assert!(first.is_valid);
        assert_eq!(first, service.validate(text));
    }

    #[test]
    fn test_aggregated_serializes_camel_case() {
        let result = AggregatedValidationResult {
            is_valid: true,
            messages: vec!["ok".to_string()],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"isValid": true, "messages": ["ok"]}));
    }
}
