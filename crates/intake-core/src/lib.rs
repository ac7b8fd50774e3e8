//! Core domain types for the intake lead-relay service.
//!
//! Provides the submission models, validation over untyped JSON input,
//! notification formatting for the two Telegram markup dialects, and the
//! clock abstraction used for server-generated timestamps. This crate is
//! pure: no I/O, no global state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod format;
pub mod submission;
pub mod time;
pub mod validate;

pub use error::{ValidationError, Violation};
pub use submission::{ContactSubmission, ServiceOrderSubmission};
pub use time::{Clock, FixedClock, SystemClock};
pub use validate::{validate_contact, validate_service_order};
