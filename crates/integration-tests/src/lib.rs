//! End-to-end tests for the Bloom API.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare a database with the demo catalog
//! cargo run -p bloom-cli -- migrate
//! cargo run -p bloom-cli -- seed --reset
//!
//! # Start the API
//! cargo run -p bloom-api
//!
//! # Run the ignored tests against it
//! cargo test -p bloom-integration-tests -- --ignored
//! ```
//!
//! The server address defaults to `http://127.0.0.1:10000` and can be
//! overridden with `BLOOM_BASE_URL`.

use reqwest::Client;

/// Base URL of the running API.
#[must_use]
pub fn base_url() -> String {
    std::env::var("BLOOM_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:10000".to_string())
}

/// Build an absolute URL for an `/api` path.
#[must_use]
pub fn api_url(path: &str) -> String {
    format!("{}/api{path}", base_url())
}

/// HTTP client shared by the tests.
///
/// # Panics
///
/// Panics if the TLS backend cannot be initialized.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}
