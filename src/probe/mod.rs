//! Client-side probe that runs the standard checks against live services.
//!
//! - [`checks`]: the endpoints probed and how a response is judged
//! - [`client`]: HTTP client issuing the checks concurrently
//! - [`report`]: per-check outcomes and the aggregate report

pub mod checks;
pub mod client;
pub mod report;

pub use checks::{echo_payload, evaluate, Endpoint};
pub use client::{parse_target, ProbeClient};
pub use report::{CheckOutcome, ProbeReport};
