//! Submission models for the two intake forms.
//!
//! Submissions are request-scoped values: deserialized from the request
//! body, validated, rendered into a notification, delivered, and dropped.
//! Nothing is persisted.

/// A validated contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    /// Sender name, 2-50 characters.
    pub name: String,
    /// Sender email address, syntactically valid.
    pub email: String,
    /// Optional phone number; no format constraint beyond being a string.
    pub phone: Option<String>,
    /// Message subject, 5-100 characters.
    pub subject: String,
    /// Message body, 10-1000 characters.
    pub message: String,
}

/// A validated service-order submission.
///
/// All fields are required non-empty strings. `budget` and `deadline` carry
/// bracket codes that the formatter translates to human-readable labels;
/// unrecognized codes pass through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOrderSubmission {
    /// Client name.
    pub name: String,
    /// Client email address.
    pub email: String,
    /// Client phone number.
    pub phone: String,
    /// Budget bracket code, e.g. `100-300`.
    pub budget: String,
    /// Deadline code, e.g. `1-2-hafta`.
    pub deadline: String,
    /// Free-form project description.
    pub message: String,
    /// Requested service category.
    pub service: String,
}
