//! HTTP API module for the informational, health and echo endpoints.

pub mod docs;
pub mod handlers;
pub mod routes;
pub mod server;

pub use handlers::{AppState, ServiceIdentity};
pub use routes::create_router;
pub use server::serve;
