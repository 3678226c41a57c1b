//! Terminal rendering of events, tickets and profiles.

use bookmyevent_core::{Event, Ticket, User};

/// Print one line of user-facing output.
#[allow(clippy::print_stdout)]
pub fn say(message: &str) {
    println!("{message}");
}

/// One-line summary of an event.
pub fn event_line(event: &Event) -> String {
    let date = event
        .date
        .as_ref()
        .map_or_else(|| "date TBA".to_string(), |d| d.display_long());
    let price = match &event.price {
        Some(price) if price.is_free() => "free".to_string(),
        Some(price) => price.to_string(),
        None => "-".to_string(),
    };

    let title = if event.title.trim().is_empty() {
        "Untitled Event"
    } else {
        &event.title
    };

    let mut line = format!("{}  {date}  {title}", event.id);
    if !event.venue.is_empty() {
        line.push_str(" @ ");
        line.push_str(&event.venue);
    }
    line.push_str("  ");
    line.push_str(&price);
    if let Some(tag) = &event.tag {
        line.push_str(&format!("  [{tag}]"));
    }
    line
}

pub fn print_events(events: &[&Event]) {
    if events.is_empty() {
        say("No events found.");
        return;
    }
    for event in events {
        say(&event_line(event));
    }
}

pub fn print_nearby(found: &[(&Event, f64)]) {
    if found.is_empty() {
        say("No events found nearby.");
        return;
    }
    for (event, distance) in found {
        say(&format!("{}  ({distance:.1} km)", event_line(event)));
    }
}

/// One line per ticket: ticket id, then the event when the backend populated it.
pub fn print_tickets(tickets: &[Ticket]) {
    if tickets.is_empty() {
        say("No booked events.");
        return;
    }
    for ticket in tickets {
        let detail = match ticket.event.as_ref() {
            Some(event_ref) => event_ref
                .event()
                .map_or_else(|| format!("event {}", event_ref.id()), event_line),
            None => "event no longer exists".to_string(),
        };
        say(&format!("{}  {detail}", ticket.id));
    }
}

pub fn print_profile(user: &User) {
    say(&format!("[{}] {}", user.initial(), user.name));
    say(&format!("email: {}", user.email));
    say(&format!("role:  {}", user.role));
}
