//! Ticket commands: book, list, cancel.

use bookmyevent_client::{BookingOutcome, book_event};
use bookmyevent_core::{EventId, TicketId};

use super::{CommandError, Context};
use crate::output;

/// Book unless a ticket for the event already exists. Both outcomes succeed.
pub async fn book(ctx: &Context, event_id: &str) -> Result<(), CommandError> {
    let session = ctx.session()?;
    let event_id = EventId::parse(event_id).map_err(|e| CommandError::invalid("event id", e))?;

    match book_event(&ctx.api, &session, &event_id).await? {
        BookingOutcome::Booked => output::say("Event booked successfully!"),
        BookingOutcome::AlreadyBooked { .. } => output::say("You have already booked this event."),
    }
    Ok(())
}

pub async fn list(ctx: &Context) -> Result<(), CommandError> {
    let session = ctx.session()?;
    let tickets = ctx.api.list_my_tickets(&session).await?;
    output::print_tickets(&tickets);
    Ok(())
}

pub async fn cancel(ctx: &Context, ticket_id: &str) -> Result<(), CommandError> {
    let session = ctx.session()?;
    let ticket_id =
        TicketId::parse(ticket_id).map_err(|e| CommandError::invalid("ticket id", e))?;
    ctx.api.cancel_ticket(&session, &ticket_id).await?;
    output::say("Ticket cancelled.");
    Ok(())
}
