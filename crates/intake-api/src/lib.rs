//! Intake HTTP API.
//!
//! Exposes the two lead-intake endpoints plus a liveness probe, with the
//! middleware stack (request ids, tracing, timeout, panic boundary) wrapped
//! around them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod server;

pub use config::Config;
pub use server::{create_router, start_server, AppState};
