//! Integration tests for the echo service.
//!
//! Each test starts a real server on an ephemeral port and talks to it over
//! HTTP. Run with: cargo test --test integration

mod common;
mod probe;
mod service;
