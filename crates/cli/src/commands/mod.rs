//! Subcommand handlers.

pub mod auth;
pub mod events;
pub mod tickets;

use bookmyevent_client::{
    ApiClient, ApiError, ClientConfig, ConfigError, FileSessionStore, Session, SessionError,
    SessionStore,
};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A protected command ran without a stored session.
    #[error("not logged in")]
    NotLoggedIn,

    /// Register answered 400.
    #[error("User already registered. Please login.")]
    AlreadyRegistered,

    /// Login was rejected.
    #[error("Login failed, please check your credentials")]
    LoginFailed,

    /// A command-line value could not be parsed.
    #[error("Invalid {field}: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Api(ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<ApiError> for CommandError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AlreadyRegistered => Self::AlreadyRegistered,
            ApiError::InvalidCredentials => Self::LoginFailed,
            other => Self::Api(other),
        }
    }
}

impl CommandError {
    pub fn invalid(field: &'static str, reason: impl ToString) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.to_string(),
        }
    }
}

/// What every command needs: the API client and the session store.
pub struct Context {
    pub api: ApiClient,
    pub store: Box<dyn SessionStore>,
}

impl Context {
    /// Build from `BOOKMYEVENT_*` environment variables.
    pub fn from_env() -> Result<Self, CommandError> {
        let config = ClientConfig::from_env()?;
        let api = ApiClient::new(&config)?;
        let store = FileSessionStore::new(&config.session_file);
        tracing::debug!(api = %config.api_url, session = %store.path().display(), "Loaded configuration");

        Ok(Self {
            api,
            store: Box::new(store),
        })
    }

    /// The stored session, or `NotLoggedIn`.
    pub fn session(&self) -> Result<Session, CommandError> {
        self.store.load()?.ok_or(CommandError::NotLoggedIn)
    }
}
