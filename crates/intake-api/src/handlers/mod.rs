//! Request handlers for the intake API.

mod contact;
mod health;
mod service_order;

pub use contact::submit_contact;
pub use health::liveness_check;
pub use service_order::submit_service_order;
