//! Booking backend REST client.
//!
//! One method per endpoint. Authenticated calls take the [`Session`]
//! explicitly and send its token verbatim in the `Authorization` header
//! (no `Bearer` prefix, which is what the backend expects).

use bookmyevent_core::{Email, Event, EventId, EventUpdate, NewEvent, Role, Ticket, TicketId, User, UserId};
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::booking::TicketApi;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::Session;

/// REST client for the booking backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    role: Option<Role>,
    #[serde(default, rename = "userId")]
    user_id: Option<UserId>,
    #[serde(default)]
    username: Option<String>,
}

#[derive(Deserialize)]
struct UserEventsResponse {
    #[serde(rename = "userEvents", default)]
    user_events: Vec<Value>,
}

#[derive(Deserialize)]
struct UserTicketsResponse {
    #[serde(rename = "userTickets", default)]
    user_tickets: Vec<Value>,
}

#[derive(Serialize)]
struct CreateTicketRequest<'a> {
    #[serde(rename = "eventId")]
    event_id: &'a EventId,
}

impl ApiClient {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("bookmyevent-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_http_client(client, config.api_url.clone()))
    }

    /// Create a client from an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(client: reqwest::Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    /// Backend origin requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Create an account and return the session for it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AlreadyRegistered` when the backend answers 400,
    /// `ApiError::Status` for other failures.
    #[instrument(skip(self, email, password), fields(email = %email.redacted()))]
    pub async fn register(
        &self,
        username: &str,
        email: &Email,
        password: &SecretString,
    ) -> Result<Session, ApiError> {
        if username.trim().is_empty() {
            return Err(ApiError::InvalidInput("username cannot be empty".to_string()));
        }

        let response = self
            .client
            .post(self.url(&["user", "register"])?)
            .json(&RegisterRequest {
                username: username.trim(),
                email: email.as_str(),
                password: password.expose_secret(),
            })
            .send()
            .await?;

        if response.status() == StatusCode::BAD_REQUEST {
            return Err(ApiError::AlreadyRegistered);
        }

        let auth: AuthResponse = decode_json(response).await?;
        let session = session_from(auth)?
            .with_username(username.trim())
            .with_email(email.as_str());

        debug!("Account registered");
        Ok(session)
    }

    /// Log in and return the session.
    ///
    /// The username defaults to the email's local part when the backend
    /// does not send one.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidCredentials` when the backend rejects the login.
    #[instrument(skip(self, email, password), fields(email = %email.redacted()))]
    pub async fn login(&self, email: &Email, password: &SecretString) -> Result<Session, ApiError> {
        let response = self
            .client
            .post(self.url(&["user", "login"])?)
            .json(&LoginRequest {
                email: email.as_str(),
                password: password.expose_secret(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Login rejected");
            return Err(ApiError::InvalidCredentials);
        }

        let auth: AuthResponse = decode_json(response).await?;
        let mut session = session_from(auth)?.with_email(email.as_str());
        if session.username.is_none() {
            session.username = Some(email.local_part().to_owned());
        }

        debug!(role = ?session.role, "Logged in");
        Ok(session)
    }

    /// Fetch the profile of the session's user.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the token is rejected.
    #[instrument(skip(self, session))]
    pub async fn profile(&self, session: &Session) -> Result<User, ApiError> {
        let request = self.client.get(self.url(&["user"])?);
        decode_json(authorized(request, session).send().await?).await
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// List every event. The token is sent when a session is available.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is not an event list.
    #[instrument(skip(self, session))]
    pub async fn list_events(&self, session: Option<&Session>) -> Result<Vec<Event>, ApiError> {
        let mut request = self.client.get(self.url(&["event", "all"])?);
        if let Some(session) = session {
            request = authorized(request, session);
        }
        let documents: Vec<Value> = decode_json(request.send().await?).await?;
        let events: Vec<Event> = decode_each(documents, "event");

        debug!(count = events.len(), "Fetched events");
        Ok(events)
    }

    /// Events created by the session's user.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the token is rejected.
    #[instrument(skip(self, session))]
    pub async fn my_events(&self, session: &Session) -> Result<Vec<Event>, ApiError> {
        let request = self.client.get(self.url(&["event"])?);
        let body: UserEventsResponse = decode_json(authorized(request, session).send().await?).await?;
        Ok(decode_each(body.user_events, "event"))
    }

    /// Publish a new event. Returns the stored event when the backend echoes it.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the event.
    #[instrument(skip(self, session, event), fields(title = %event.title))]
    pub async fn create_event(
        &self,
        session: &Session,
        event: &NewEvent,
    ) -> Result<Option<Event>, ApiError> {
        if event.title.trim().is_empty() {
            return Err(ApiError::InvalidInput("event title cannot be empty".to_string()));
        }

        let request = self.client.post(self.url(&["event", "create"])?).json(event);
        let response = authorized(request, session).send().await?;
        let body = success_text(response).await?;

        Ok(created_event(&body))
    }

    /// Apply a partial update to an event.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` for an empty update, otherwise error if
    /// the request fails or the backend rejects it.
    #[instrument(skip(self, session, update), fields(event_id = %event_id))]
    pub async fn update_event(
        &self,
        session: &Session,
        event_id: &EventId,
        update: &EventUpdate,
    ) -> Result<(), ApiError> {
        if update.is_empty() {
            return Err(ApiError::InvalidInput("nothing to update".to_string()));
        }

        let request = self
            .client
            .put(self.url(&["event", event_id.as_str()])?)
            .json(update);
        success_text(authorized(request, session).send().await?).await?;
        Ok(())
    }

    /// Delete an event owned by the session's user.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects it.
    #[instrument(skip(self, session), fields(event_id = %event_id))]
    pub async fn delete_event(&self, session: &Session, event_id: &EventId) -> Result<(), ApiError> {
        let request = self.client.delete(self.url(&["event", event_id.as_str()])?);
        success_text(authorized(request, session).send().await?).await?;
        Ok(())
    }

    // =========================================================================
    // Tickets
    // =========================================================================

    /// Tickets held by the session's user.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the token is rejected.
    #[instrument(skip(self, session))]
    pub async fn list_my_tickets(&self, session: &Session) -> Result<Vec<Ticket>, ApiError> {
        let request = self.client.get(self.url(&["ticket", "user"])?);
        let body: UserTicketsResponse =
            decode_json(authorized(request, session).send().await?).await?;
        Ok(decode_each(body.user_tickets, "ticket"))
    }

    /// Book a ticket for an event without checking for an existing one.
    ///
    /// Prefer [`crate::book_event`], which checks first.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects it.
    #[instrument(skip(self, session), fields(event_id = %event_id))]
    pub async fn create_ticket(&self, session: &Session, event_id: &EventId) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url(&["ticket"])?)
            .json(&CreateTicketRequest { event_id });
        success_text(authorized(request, session).send().await?).await?;
        Ok(())
    }

    /// Cancel a ticket.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects it.
    #[instrument(skip(self, session), fields(ticket_id = %ticket_id))]
    pub async fn cancel_ticket(&self, session: &Session, ticket_id: &TicketId) -> Result<(), ApiError> {
        let request = self.client.delete(self.url(&["ticket", ticket_id.as_str()])?);
        success_text(authorized(request, session).send().await?).await?;
        Ok(())
    }

    /// Build an endpoint URL, percent-encoding each segment.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidInput(format!("cannot use {} as API base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl TicketApi for ApiClient {
    async fn list_my_tickets(&self, session: &Session) -> Result<Vec<Ticket>, ApiError> {
        Self::list_my_tickets(self, session).await
    }

    async fn create_ticket(&self, session: &Session, event_id: &EventId) -> Result<(), ApiError> {
        Self::create_ticket(self, session, event_id).await
    }
}

fn authorized(request: RequestBuilder, session: &Session) -> RequestBuilder {
    request.header(reqwest::header::AUTHORIZATION, session.token().expose_secret())
}

fn session_from(auth: AuthResponse) -> Result<Session, ApiError> {
    let token = auth
        .token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::Parse("response did not include a token".to_string()))?;

    let mut session = Session::new(SecretString::from(token));
    session.role = auth.role;
    session.user_id = auth.user_id;
    session.username = auth.username;
    Ok(session)
}

/// Read the body of a successful response, or turn the failure into `ApiError::Status`.
async fn success_text(response: Response) -> Result<String, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.text().await?)
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = success_text(response).await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Decode list items one by one, dropping (and logging) the ones that do not fit.
fn decode_each<T: DeserializeOwned>(documents: Vec<Value>, kind: &'static str) -> Vec<T> {
    let total = documents.len();
    let decoded: Vec<T> = documents
        .into_iter()
        .filter_map(|doc| {
            serde_json::from_value(doc)
                .map_err(|e| warn!(kind, error = %e, "Skipping malformed document"))
                .ok()
        })
        .collect();
    if decoded.len() < total {
        debug!(kind, total, kept = decoded.len(), "Dropped malformed documents");
    }
    decoded
}

/// The create endpoint answers with the event, wrapped or not, or with a bare message.
fn created_event(body: &str) -> Option<Event> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Created {
        Bare(Event),
        Wrapped { event: Event },
    }

    match serde_json::from_str::<Created>(body).ok()? {
        Created::Bare(event) | Created::Wrapped { event } => Some(event),
    }
}
