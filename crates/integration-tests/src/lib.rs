//! Integration tests for ShelfSense.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p shelfsense-cli -- migrate
//!
//! # Start the server
//! cargo run -p shelfsense-server
//!
//! # Run integration tests
//! cargo test -p shelfsense-integration-tests -- --ignored
//! ```
//!
//! Tests are `#[ignore]`d by default because they need a live server and
//! database. Each test works against its own generated user id so runs do
//! not interfere with each other or with leftover data.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;

/// Base URL for the server API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SHELFSENSE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client for tests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// Generate a unique user id so tests do not collide.
#[must_use]
pub fn unique_user(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    format!("{prefix}-{timestamp:x}")
}
