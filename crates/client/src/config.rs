//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `BOOKMYEVENT_API_URL` - Backend origin (default: the hosted backend)
//! - `BOOKMYEVENT_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `BOOKMYEVENT_SESSION_FILE` - Where the login session is kept
//!   (default: `$HOME/.bookmyevent/session.json`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Hosted backend the web client talked to.
pub const DEFAULT_API_URL: &str = "https://event-booking-backend-ivh3.onrender.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const SESSION_DIR: &str = ".bookmyevent";
const SESSION_FILE: &str = "session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin; endpoint paths are joined onto it.
    pub api_url: Url,
    /// Timeout applied to every request.
    pub timeout: Duration,
    /// Location of the persisted session.
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file: default_session_file(std::env::var("HOME").ok()),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment (and `.env`, if present).
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = match get("BOOKMYEVENT_API_URL") {
            Some(raw) => parse_api_url(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("BOOKMYEVENT_API_URL".to_string(), e)
            })?,
            None => default_api_url(),
        };

        let timeout_secs = match get("BOOKMYEVENT_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("BOOKMYEVENT_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "BOOKMYEVENT_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let session_file = get("BOOKMYEVENT_SESSION_FILE")
            .map_or_else(|| default_session_file(get("HOME")), PathBuf::from);

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            session_file,
        })
    }

    /// Override the backend origin.
    #[must_use]
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }

    /// Override the session file location.
    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }
}

fn parse_api_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

#[allow(clippy::expect_used)] // constant URL, covered by tests
fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("default API URL is valid")
}

fn default_session_file(home: Option<String>) -> PathBuf {
    home.map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(SESSION_DIR)
        .join(SESSION_FILE)
}
