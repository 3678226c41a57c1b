//! Login session and where it is kept.
//!
//! A [`Session`] is passed explicitly into every authenticated API call.
//! A [`SessionStore`] persists it between invocations with three
//! capabilities: read the current session, save one, and clear it.
//!
//! The on-disk form is a flat JSON object with the keys `token`,
//! `username`, `email`, `role` and `userId`. There is no expiry or refresh:
//! a stale token simply makes the next request fail.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use bookmyevent_core::{Role, UserId};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while reading or writing a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Filesystem failure.
    #[error("session storage error: {0}")]
    Io(#[from] io::Error),

    /// The stored session is not valid JSON.
    #[error("session file is corrupt: {0}")]
    Corrupt(serde_json::Error),

    /// The session could not be encoded for storage.
    #[error("failed to encode session: {0}")]
    Encode(serde_json::Error),
}

/// Authentication state of the logged-in user.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct Session {
    token: SecretString,
    /// Display name, when known.
    pub username: Option<String>,
    /// Login email, when known.
    pub email: Option<String>,
    /// Role reported at login.
    pub role: Option<Role>,
    /// Backend id reported at login.
    pub user_id: Option<UserId>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl Session {
    /// A session holding only a token.
    #[must_use]
    pub const fn new(token: SecretString) -> Self {
        Self {
            token,
            username: None,
            email: None,
            role: None,
            user_id: None,
        }
    }

    /// The bearer token sent in the `Authorization` header.
    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Name to greet the user with: username, else email, else "user".
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("user")
    }
}

/// Persisted form. Field names are the storage keys.
#[derive(Serialize, Deserialize)]
struct StoredSession {
    #[serde(default)]
    token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    user_id: Option<UserId>,
}

impl From<&Session> for StoredSession {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token.expose_secret().to_owned(),
            username: session.username.clone(),
            email: session.email.clone(),
            role: session.role.clone(),
            user_id: session.user_id.clone(),
        }
    }
}

impl StoredSession {
    fn into_session(self) -> Option<Session> {
        if self.token.trim().is_empty() {
            return None;
        }
        Some(Session {
            token: SecretString::from(self.token),
            username: self.username,
            email: self.email,
            role: self.role,
            user_id: self.user_id,
        })
    }
}

/// Storage capability for the current session.
pub trait SessionStore: Send + Sync {
    /// Read the current session; `None` when logged out.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read.
    fn load(&self) -> Result<Option<Session>, SessionError>;

    /// Replace the current session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Forget the current session. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing session cannot be removed.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Session kept as a JSON file, readable only by the owner on Unix.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredSession = serde_json::from_slice(&bytes).map_err(SessionError::Corrupt)?;
        Ok(stored.into_session())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json =
            serde_json::to_vec_pretty(&StoredSession::from(session)).map_err(SessionError::Encode)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        // The creation mode does not apply to a file that already existed.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(&json)?;
        file.sync_all()?;

        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    current: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out logged in.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            current: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        Ok(self
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
