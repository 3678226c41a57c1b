//! BookMyEvent Client - talks to the booking backend.
//!
//! # Modules
//!
//! - [`client`] - `ApiClient`, one method per REST endpoint
//! - [`booking`] - Book an event unless the user already holds a ticket
//! - [`browse`] - Filter the event list by tag, distance or date
//! - [`session`] - Login session and its persistence
//! - [`config`] - Environment-driven configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use bookmyevent_client::{ApiClient, ClientConfig, FileSessionStore, SessionStore, book_event};
//!
//! let config = ClientConfig::from_env()?;
//! let api = ApiClient::new(&config)?;
//! let store = FileSessionStore::new(&config.session_file);
//!
//! let session = api.login(&email, &password).await?;
//! store.save(&session)?;
//! book_event(&api, &session, &event_id).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod booking;
pub mod browse;
pub mod client;
pub mod config;
pub mod error;
pub mod session;

pub use booking::{BookingOutcome, TicketApi, book_event, find_ticket};
pub use browse::{filter_by_tag, nearby, upcoming};
pub use client::ApiClient;
pub use config::{ClientConfig, ConfigError, DEFAULT_API_URL};
pub use error::ApiError;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionError, SessionStore};
