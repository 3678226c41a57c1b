//! Tickets (bookings).

use serde::{Deserialize, Serialize};

use crate::models::event::Event;
use crate::models::lenient;
use crate::types::{EventId, TicketId};

/// What a ticket says about its event.
///
/// `GET /ticket/user` populates the event; other endpoints may return only
/// its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventRef {
    /// Full event document.
    Populated(Box<Event>),
    /// Bare event id.
    Id(EventId),
}

impl EventRef {
    /// The referenced event's id.
    #[must_use]
    pub fn id(&self) -> &EventId {
        match self {
            Self::Populated(event) => &event.id,
            Self::Id(id) => id,
        }
    }

    /// The event document, if populated.
    #[must_use]
    pub fn event(&self) -> Option<&Event> {
        match self {
            Self::Populated(event) => Some(event),
            Self::Id(_) => None,
        }
    }
}

/// A record linking one user to one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(rename = "_id")]
    pub id: TicketId,
    /// `None` when the event has since been deleted or has no usable id.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub event: Option<EventRef>,
}

impl Ticket {
    /// Id of the booked event, if it still exists.
    #[must_use]
    pub fn event_id(&self) -> Option<&EventId> {
        self.event.as_ref().map(EventRef::id)
    }

    /// Whether this ticket is for `event_id`.
    #[must_use]
    pub fn is_for(&self, event_id: &EventId) -> bool {
        self.event_id() == Some(event_id)
    }
}
