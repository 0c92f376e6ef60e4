//! Stateless JSON echo service.
//!
//! Three trivial endpoints plus a ping probe, served by axum:
//!
//! ```text
//! GET  /        -> {message, service, environment, version}
//! GET  /health  -> {status: "healthy", service}
//! GET  /ping    -> {status: "ok"}
//! POST /echo    -> {echo: <body>, service}
//! ```
//!
//! Every response is a pure function of the request and the identity fixed at
//! startup. A malformed echo body is answered with 400 and `{"error": ...}`.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: HTTP router, handlers and OpenAPI document
//! - [`metrics`]: Prometheus request metrics
//! - [`probe`]: Client that checks running services
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod probe;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, AppError, Result};
