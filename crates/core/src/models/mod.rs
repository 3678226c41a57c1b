//! Wire models for the booking backend.
//!
//! Field names follow the backend's JSON (`_id`, camelCase). Unknown fields
//! are ignored and optional fields tolerate `null`, absence and malformed
//! values.

pub mod event;
mod lenient;
pub mod ticket;
pub mod user;

pub use event::{Event, EventUpdate, NewEvent};
pub use ticket::{EventRef, Ticket};
pub use user::User;
