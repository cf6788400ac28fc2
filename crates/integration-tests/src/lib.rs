//! Integration tests for the brewery inventory.
//!
//! These run over HTTP against a live server and are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server (in-memory store, seeded with the demo catalog)
//! cargo run -p brewery-web
//!
//! # Run integration tests
//! cargo test -p brewery-integration-tests -- --ignored
//! ```
//!
//! Set `BREWERY_TEST_BASE_URL` to target a server other than
//! `http://localhost:8080`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::{Client, redirect};

/// Default server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Shared state for one test: an HTTP client and the server address.
#[derive(Debug, Clone)]
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Build a context from the environment.
    ///
    /// Redirects are not followed so tests can assert on them.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the client cannot be built.
    pub fn from_env() -> Result<Self, reqwest::Error> {
        let base_url = std::env::var("BREWERY_TEST_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
