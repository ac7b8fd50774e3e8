//! Validation error types for inbound submissions.
//!
//! A submission is either fully valid or rejected outright. Rejections carry
//! every violated constraint, not just the first, so the client can correct
//! the whole form in one pass.

use serde::Serialize;
use thiserror::Error;

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Name of the offending field.
    pub field: String,
    /// Human-readable description of the constraint that failed.
    pub message: String,
}

impl Violation {
    /// Creates a violation for the given field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Validation failure listing every violated constraint.
#[derive(Debug, Clone, Error)]
#[error("validation failed with {} violation(s)", violations.len())]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Creates a validation error from collected violations.
    ///
    /// Callers are expected to pass a non-empty list; an empty list would
    /// mean the submission was valid.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns the violated constraints.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns true if the given field is among the violations.
    pub fn names_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_reports_violation_count() {
        let error = ValidationError::new(vec![
            Violation::new("name", "must be between 2 and 50 characters"),
            Violation::new("email", "must be a valid email address"),
        ]);

        assert_eq!(error.to_string(), "validation failed with 2 violation(s)");
        assert!(error.names_field("name"));
        assert!(error.names_field("email"));
        assert!(!error.names_field("phone"));
    }

    #[test]
    fn violations_serialize_with_field_and_message() {
        let violation = Violation::new("subject", "must be between 5 and 100 characters");
        let json = serde_json::to_value(&violation).expect("serialize violation");

        assert_eq!(json["field"], "subject");
        assert_eq!(json["message"], "must be between 5 and 100 characters");
    }
}
