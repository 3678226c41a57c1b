//! Integration tests for the BookMyEvent client.
//!
//! Each test starts a `wiremock` server standing in for the booking backend
//! and points a real [`ApiClient`] at it, so requests go over HTTP exactly as
//! they would in production.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bookmyevent-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth` - register, login, profile, session persistence
//! - `booking` - the check-then-book flow
//! - `events` - listing, editing and deleting events, cancelling tickets

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use bookmyevent_client::{ApiClient, ClientConfig, Session};
use secrecy::SecretString;
use wiremock::MockServer;

/// Token the fixtures hand out and expect back.
pub const TOKEN: &str = "test-token-123";

/// A mock backend and a client pointed at it.
pub struct TestContext {
    pub server: MockServer,
    pub api: ApiClient,
}

impl TestContext {
    /// Start a fresh mock backend.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built for the mock server's address.
    #[allow(clippy::expect_used)]
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = ClientConfig::default()
            .with_api_url(server.uri().parse().expect("mock server URI is a URL"))
            .with_session_file(temp_session_file());
        let api = ApiClient::new(&config).expect("Failed to create API client");
        Self { server, api }
    }

    /// Number of requests the mock backend saw for `method` and `path`.
    pub async fn count(&self, method: &str, path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.as_str() == method && r.url.path() == path)
            .count()
    }
}

/// A logged-in session carrying [`TOKEN`].
#[must_use]
pub fn session() -> Session {
    Session::new(SecretString::from(TOKEN))
}

/// A unique, not-yet-existing session file under the system temp dir.
#[must_use]
pub fn temp_session_file() -> PathBuf {
    std::env::temp_dir()
        .join(format!("bookmyevent-it-{}", uuid::Uuid::new_v4()))
        .join("session.json")
}
