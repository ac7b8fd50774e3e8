//! Validation of untrusted submission payloads.
//!
//! Both validators take the raw parsed JSON body and either produce a typed
//! submission or a [`ValidationError`] listing every violated constraint.
//! Unknown extra fields are ignored, never rejected.
//!
//! The two forms deliberately carry different strictness levels: the contact
//! form enforces a full constraint schema, the service-order form only
//! checks that its seven fields are present and non-empty.

use email_address::EmailAddress;
use serde_json::Value;

use crate::{
    error::{ValidationError, Violation},
    submission::{ContactSubmission, ServiceOrderSubmission},
};

/// Field names required by the service-order form.
pub const SERVICE_ORDER_FIELDS: [&str; 7] =
    ["name", "email", "phone", "budget", "deadline", "message", "service"];

/// Validates a contact-form payload against the full constraint schema.
///
/// Collects every violation: length bounds on `name`, `subject` and
/// `message`, email syntax on `email`, and type checks everywhere. `phone`
/// is optional but must be a string when present.
///
/// # Errors
///
/// Returns [`ValidationError`] with one [`Violation`] per failed constraint.
pub fn validate_contact(payload: &Value) -> Result<ContactSubmission, ValidationError> {
    let mut violations = Vec::new();

    let name = bounded_string(payload, "name", 2, 50, &mut violations);
    let email = email_field(payload, &mut violations);
    let phone = optional_string(payload, "phone", &mut violations);
    let subject = bounded_string(payload, "subject", 5, 100, &mut violations);
    let message = bounded_string(payload, "message", 10, 1000, &mut violations);

    // Every None above comes with a recorded violation.
    if let (Some(name), Some(email), Some(subject), Some(message), true) =
        (name, email, subject, message, violations.is_empty())
    {
        Ok(ContactSubmission { name, email, phone, subject, message })
    } else {
        Err(ValidationError::new(violations))
    }
}

/// Validates a service-order payload with a presence-only check.
///
/// Every one of the seven fields must be present, a string, and non-empty.
/// No further constraints are enforced; this coarser strictness level
/// mirrors the form it serves.
///
/// # Errors
///
/// Returns [`ValidationError`] naming each absent or empty field.
pub fn validate_service_order(payload: &Value) -> Result<ServiceOrderSubmission, ValidationError> {
    let mut violations = Vec::new();

    let mut required = |field: &str| -> Option<String> {
        match payload.get(field).and_then(Value::as_str) {
            Some(s) if !s.is_empty() => Some(s.to_string()),
            _ => {
                violations.push(Violation::new(field, "is required"));
                None
            },
        }
    };

    let name = required("name");
    let email = required("email");
    let phone = required("phone");
    let budget = required("budget");
    let deadline = required("deadline");
    let message = required("message");
    let service = required("service");

    if let (
        Some(name),
        Some(email),
        Some(phone),
        Some(budget),
        Some(deadline),
        Some(message),
        Some(service),
    ) = (name, email, phone, budget, deadline, message, service)
    {
        Ok(ServiceOrderSubmission { name, email, phone, budget, deadline, message, service })
    } else {
        Err(ValidationError::new(violations))
    }
}

/// Extracts a required string field with inclusive character-count bounds.
fn bounded_string(
    payload: &Value,
    field: &str,
    min: usize,
    max: usize,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    let Some(s) = payload.get(field).and_then(Value::as_str) else {
        violations.push(Violation::new(field, "must be a string"));
        return None;
    };

    let len = s.chars().count();
    if len < min || len > max {
        violations
            .push(Violation::new(field, format!("must be between {min} and {max} characters")));
        return None;
    }

    Some(s.to_string())
}

/// Extracts the `email` field and checks address syntax.
fn email_field(payload: &Value, violations: &mut Vec<Violation>) -> Option<String> {
    let Some(s) = payload.get("email").and_then(Value::as_str) else {
        violations.push(Violation::new("email", "must be a string"));
        return None;
    };

    if s.parse::<EmailAddress>().is_err() {
        violations.push(Violation::new("email", "must be a valid email address"));
        return None;
    }

    Some(s.to_string())
}

/// Extracts an optional string field; present non-string values are
/// violations, absence is not.
fn optional_string(
    payload: &Value,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match payload.get(field) {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(Violation::new(field, "must be a string"));
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_contact() -> Value {
        json!({
            "name": "Ali",
            "email": "ali@example.com",
            "subject": "Hello there",
            "message": "This is a test message."
        })
    }

    #[test]
    fn valid_contact_passes() {
        let submission = validate_contact(&valid_contact()).expect("valid submission");

        assert_eq!(submission.name, "Ali");
        assert_eq!(submission.email, "ali@example.com");
        assert_eq!(submission.phone, None);
        assert_eq!(submission.subject, "Hello there");
    }

    #[test]
    fn contact_name_length_bounds_enforced() {
        let mut payload = valid_contact();
        payload["name"] = json!("A");
        let error = validate_contact(&payload).expect_err("one-char name");
        assert!(error.names_field("name"));

        payload["name"] = json!("x".repeat(51));
        let error = validate_contact(&payload).expect_err("51-char name");
        assert!(error.names_field("name"));

        payload["name"] = json!("x".repeat(50));
        assert!(validate_contact(&payload).is_ok());
    }

    #[test]
    fn contact_invalid_email_rejected() {
        for bad in ["not-an-email", "missing@tld@twice", "", "a b@example.com"] {
            let mut payload = valid_contact();
            payload["email"] = json!(bad);
            let error = validate_contact(&payload).expect_err("invalid email");
            assert!(error.names_field("email"), "expected email violation for {bad:?}");
        }
    }

    #[test]
    fn contact_collects_all_violations() {
        let payload = json!({
            "name": "A",
            "email": "nope",
            "subject": "hi",
            "message": "short"
        });

        let error = validate_contact(&payload).expect_err("everything invalid");
        assert_eq!(error.violations().len(), 4);
        assert!(error.names_field("name"));
        assert!(error.names_field("email"));
        assert!(error.names_field("subject"));
        assert!(error.names_field("message"));
    }

    #[test]
    fn contact_phone_optional_but_typed() {
        let mut payload = valid_contact();
        payload["phone"] = json!("+998 90 123 45 67");
        let submission = validate_contact(&payload).expect("phone present");
        assert_eq!(submission.phone.as_deref(), Some("+998 90 123 45 67"));

        payload["phone"] = json!(12345);
        let error = validate_contact(&payload).expect_err("numeric phone");
        assert!(error.names_field("phone"));
    }

    #[test]
    fn contact_unknown_fields_ignored() {
        let mut payload = valid_contact();
        payload["company"] = json!("ACME");
        payload["utm_source"] = json!("newsletter");

        assert!(validate_contact(&payload).is_ok());
    }

    #[test]
    fn contact_length_counts_characters_not_bytes() {
        let mut payload = valid_contact();
        // Two Cyrillic characters are four UTF-8 bytes but satisfy min=2.
        payload["name"] = json!("Юс");

        assert!(validate_contact(&payload).is_ok());
    }

    fn valid_service_order() -> Value {
        json!({
            "name": "Ali",
            "email": "ali@example.com",
            "phone": "+998901234567",
            "budget": "100-300",
            "deadline": "1-2-hafta",
            "message": "Landing page kerak",
            "service": "Web sayt"
        })
    }

    #[test]
    fn valid_service_order_passes() {
        let submission = validate_service_order(&valid_service_order()).expect("valid order");
        assert_eq!(submission.budget, "100-300");
        assert_eq!(submission.service, "Web sayt");
    }

    #[test]
    fn service_order_missing_fields_rejected() {
        for field in SERVICE_ORDER_FIELDS {
            let mut payload = valid_service_order();
            payload.as_object_mut().expect("object payload").remove(field);

            let error = validate_service_order(&payload).expect_err("missing field");
            assert!(error.names_field(field), "expected violation for missing {field}");
        }
    }

    #[test]
    fn service_order_empty_string_counts_as_missing() {
        let mut payload = valid_service_order();
        payload["phone"] = json!("");

        let error = validate_service_order(&payload).expect_err("empty phone");
        assert!(error.names_field("phone"));
    }

    #[test]
    fn service_order_is_presence_only() {
        // The coarser check accepts values the contact schema would reject.
        let mut payload = valid_service_order();
        payload["email"] = json!("not-an-email");

        assert!(validate_service_order(&payload).is_ok());
    }
}
