//! Booking check: book an event unless the user already holds a ticket.
//!
//! The check and the booking are two separate requests with nothing tying
//! them together. Two concurrent calls for the same user and event can both
//! see "not booked" and both create a ticket. Only a unique (user, event)
//! constraint in the backend closes that window; no client-side retry can.

use std::future::Future;

use bookmyevent_core::{EventId, Ticket, TicketId};
use tracing::{error, info, instrument};

use crate::error::ApiError;
use crate::session::Session;

/// The two ticket endpoints the booking check needs.
pub trait TicketApi {
    /// `GET /ticket/user`.
    fn list_my_tickets(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<Vec<Ticket>, ApiError>> + Send;

    /// `POST /ticket`.
    fn create_ticket(
        &self,
        session: &Session,
        event_id: &EventId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Result of a booking attempt that reached the backend successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// A new ticket was created.
    Booked,
    /// The user already holds a ticket for this event; nothing was created.
    AlreadyBooked {
        /// The existing ticket.
        ticket_id: TicketId,
    },
}

/// First ticket (in list order) that is for `event_id`.
#[must_use]
pub fn find_ticket<'a>(tickets: &'a [Ticket], event_id: &EventId) -> Option<&'a Ticket> {
    tickets.iter().find(|ticket| ticket.is_for(event_id))
}

/// Book `event_id` for the session's user unless they already hold a ticket.
///
/// Issues at most one create request, and none when the ticket list cannot
/// be fetched.
///
/// # Errors
///
/// Returns the underlying error if fetching the tickets or creating the
/// ticket fails.
#[instrument(skip(api, session), fields(event_id = %event_id))]
pub async fn book_event<A: TicketApi>(
    api: &A,
    session: &Session,
    event_id: &EventId,
) -> Result<BookingOutcome, ApiError> {
    let tickets = api.list_my_tickets(session).await.map_err(|e| {
        error!(error = %e, "Failed to fetch user tickets");
        e
    })?;

    if let Some(existing) = find_ticket(&tickets, event_id) {
        info!(ticket_id = %existing.id, "Event already booked");
        return Ok(BookingOutcome::AlreadyBooked {
            ticket_id: existing.id.clone(),
        });
    }

    api.create_ticket(session, event_id).await.map_err(|e| {
        error!(error = %e, "Failed to book event");
        e
    })?;

    info!("Event booked");
    Ok(BookingOutcome::Booked)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use bookmyevent_core::EventRef;
    use secrecy::SecretString;

    use super::*;

    /// In-memory backend recording every create call.
    #[derive(Default)]
    struct FakeTickets {
        tickets: Vec<Ticket>,
        fail_list: bool,
        fail_create: bool,
        created: Mutex<Vec<EventId>>,
    }

    impl FakeTickets {
        fn holding(event_ids: &[&str]) -> Self {
            let tickets = event_ids
                .iter()
                .enumerate()
                .map(|(i, id)| Ticket {
                    id: TicketId::new(format!("t{i}")),
                    event: Some(EventRef::Id(EventId::new(*id))),
                })
                .collect();
            Self {
                tickets,
                ..Self::default()
            }
        }

        fn created(&self) -> Vec<EventId> {
            self.created.lock().unwrap().clone()
        }
    }

    impl TicketApi for FakeTickets {
        async fn list_my_tickets(&self, _session: &Session) -> Result<Vec<Ticket>, ApiError> {
            if self.fail_list {
                return Err(ApiError::Status {
                    status: 401,
                    message: "Unauthorized".to_string(),
                });
            }
            Ok(self.tickets.clone())
        }

        async fn create_ticket(&self, _session: &Session, event_id: &EventId) -> Result<(), ApiError> {
            self.created.lock().unwrap().push(event_id.clone());
            if self.fail_create {
                return Err(ApiError::Status {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    fn session() -> Session {
        Session::new(SecretString::from("tok"))
    }

    #[tokio::test]
    async fn test_already_booked_issues_no_create() {
        let api = FakeTickets::holding(&["E1"]);
        let outcome = book_event(&api, &session(), &EventId::new("E1")).await.unwrap();

        assert_eq!(
            outcome,
            BookingOutcome::AlreadyBooked {
                ticket_id: TicketId::new("t0")
            }
        );
        assert!(api.created().is_empty());
    }

    #[tokio::test]
    async fn test_not_booked_issues_exactly_one_create() {
        let api = FakeTickets::holding(&["E1"]);
        let outcome = book_event(&api, &session(), &EventId::new("E2")).await.unwrap();

        assert_eq!(outcome, BookingOutcome::Booked);
        assert_eq!(api.created(), vec![EventId::new("E2")]);
    }

    #[tokio::test]
    async fn test_list_failure_issues_no_create() {
        let api = FakeTickets {
            fail_list: true,
            ..FakeTickets::default()
        };
        let result = book_event(&api, &session(), &EventId::new("E1")).await;

        assert!(matches!(result, Err(ApiError::Status { status: 401, .. })));
        assert!(api.created().is_empty());
    }

    #[tokio::test]
    async fn test_create_failure_is_reported() {
        let api = FakeTickets {
            fail_create: true,
            ..FakeTickets::default()
        };
        let result = book_event(&api, &session(), &EventId::new("E3")).await;

        assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
        assert_eq!(api.created().len(), 1);
    }

    #[tokio::test]
    async fn test_deleted_event_tickets_are_ignored() {
        let mut api = FakeTickets::holding(&[]);
        api.tickets.push(Ticket {
            id: TicketId::new("orphan"),
            event: None,
        });
        let outcome = book_event(&api, &session(), &EventId::new("E1")).await.unwrap();

        assert_eq!(outcome, BookingOutcome::Booked);
    }

    #[test]
    fn test_find_ticket_first_match_wins() {
        let mut tickets = FakeTickets::holding(&["E1", "E2"]).tickets;
        tickets.push(Ticket {
            id: TicketId::new("dup"),
            event: Some(EventRef::Id(EventId::new("E1"))),
        });
        let found = find_ticket(&tickets, &EventId::new("E1")).unwrap();
        assert_eq!(found.id, TicketId::new("t0"));
        assert!(find_ticket(&tickets, &EventId::new("E9")).is_none());
    }
}
