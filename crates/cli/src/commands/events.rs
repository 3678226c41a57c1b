//! Event commands: browse, and manage the events you created.

use bookmyevent_client::{filter_by_tag, nearby, upcoming};
use bookmyevent_core::{Coordinates, Event, EventDate, EventId, EventUpdate, NewEvent, Price, Tag};
use clap::Args;
use tracing::{info, warn};

use super::{CommandError, Context};
use crate::output;

const DEFAULT_RADIUS_KM: f64 = 10.0;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only events with this tag (case-insensitive)
    #[arg(long)]
    pub tag: Option<String>,

    /// Only events near LAT,LON, nearest first
    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    pub near: Option<Coordinates>,

    /// Search radius for --near
    #[arg(long, requires = "near", default_value_t = DEFAULT_RADIUS_KM)]
    pub radius_km: f64,

    /// Only events from today on, soonest first
    #[arg(long)]
    pub upcoming: bool,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    /// YYYY-MM-DD or RFC 3339 timestamp
    #[arg(long)]
    pub date: String,

    #[arg(long)]
    pub venue: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Ticket price; free when omitted
    #[arg(long)]
    pub price: Option<Price>,

    /// Map position; defaults to the map's default center
    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    pub at: Option<Coordinates>,

    #[arg(long)]
    pub capacity: Option<u32>,

    #[arg(long)]
    pub tag: Option<Tag>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    #[arg(long)]
    pub title: Option<String>,

    /// YYYY-MM-DD or RFC 3339 timestamp
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub venue: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub price: Option<Price>,

    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    pub at: Option<Coordinates>,

    #[arg(long)]
    pub capacity: Option<u32>,

    #[arg(long)]
    pub tag: Option<Tag>,
}

fn parse_date(raw: &str) -> Result<EventDate, CommandError> {
    let date = EventDate::new(raw.trim());
    if date.day().is_none() {
        return Err(CommandError::invalid(
            "date",
            format!("'{raw}' is not YYYY-MM-DD or an RFC 3339 timestamp"),
        ));
    }
    Ok(date)
}

fn parse_event_id(raw: &str) -> Result<EventId, CommandError> {
    EventId::parse(raw).map_err(|e| CommandError::invalid("event id", e))
}

impl CreateArgs {
    fn into_new_event(self) -> Result<NewEvent, CommandError> {
        let mut event = NewEvent::new(self.title, parse_date(&self.date)?, self.venue);
        event.description = self.description;
        event.price = self.price.unwrap_or(Price::FREE);
        event.location = self.at.unwrap_or(Coordinates::DEFAULT_CENTER);
        event.capacity = self.capacity;
        event.tag = self.tag;
        Ok(event)
    }
}

impl EditArgs {
    fn into_update(self) -> Result<EventUpdate, CommandError> {
        Ok(EventUpdate {
            title: self.title,
            description: self.description,
            date: self.date.as_deref().map(parse_date).transpose()?,
            venue: self.venue,
            price: self.price,
            location: self.at,
            capacity: self.capacity,
            tag: self.tag,
        })
    }
}

/// Apply the tag and date filters, in that order.
fn narrow(events: Vec<Event>, args: &ListArgs, today: chrono::NaiveDate) -> Vec<Event> {
    let mut events = events;
    if let Some(tag) = args.tag.as_deref() {
        events = filter_by_tag(&events, tag).into_iter().cloned().collect();
    }
    if args.upcoming {
        events = upcoming(&events, today).into_iter().cloned().collect();
    }
    events
}

/// List events. Sends the session token when logged in.
pub async fn list(ctx: &Context, args: &ListArgs) -> Result<(), CommandError> {
    let session = ctx.store.load()?;
    let events = ctx.api.list_events(session.as_ref()).await?;
    let events = narrow(events, args, chrono::Local::now().date_naive());

    if let Some(center) = &args.near {
        output::print_nearby(&nearby(&events, center, args.radius_km));
    } else {
        output::print_events(&events.iter().collect::<Vec<_>>());
    }
    Ok(())
}

pub async fn mine(ctx: &Context) -> Result<(), CommandError> {
    let session = ctx.session()?;
    let events = ctx.api.my_events(&session).await?;
    output::print_events(&events.iter().collect::<Vec<_>>());
    Ok(())
}

pub async fn create(ctx: &Context, args: CreateArgs) -> Result<(), CommandError> {
    let session = ctx.session()?;
    let event = args.into_new_event()?;
    match ctx.api.create_event(&session, &event).await? {
        Some(created) => {
            info!(event_id = %created.id, "Event created");
            output::say(&format!("Event created: {}", output::event_line(&created)));
        }
        None => output::say("Event created."),
    }
    Ok(())
}

pub async fn edit(ctx: &Context, event_id: &str, changes: EditArgs) -> Result<(), CommandError> {
    let session = ctx.session()?;
    let event_id = parse_event_id(event_id)?;
    let update = changes.into_update()?;
    if update.is_empty() {
        return Err(CommandError::invalid("edit", "give at least one field to change"));
    }

    ctx.api.update_event(&session, &event_id, &update).await?;
    output::say("Event updated.");
    Ok(())
}

pub async fn delete(ctx: &Context, event_id: &str) -> Result<(), CommandError> {
    let session = ctx.session()?;
    let event_id = parse_event_id(event_id)?;
    ctx.api.delete_event(&session, &event_id).await.map_err(|e| {
        warn!(event_id = %event_id, error = %e, "Delete failed");
        e
    })?;
    output::say("Event deleted.");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    fn list_args() -> ListArgs {
        ListArgs {
            tag: None,
            near: None,
            radius_km: DEFAULT_RADIUS_KM,
            upcoming: false,
        }
    }

    #[test]
    fn test_create_args_defaults() {
        let args = CreateArgs {
            title: "Jazz Night".to_string(),
            date: "2030-06-01".to_string(),
            venue: "Blue Room".to_string(),
            description: String::new(),
            price: None,
            at: None,
            capacity: None,
            tag: None,
        };
        let event = args.into_new_event().unwrap();
        assert!(event.price.is_free());
        assert_eq!(event.location, Coordinates::DEFAULT_CENTER);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        assert!(matches!(
            parse_date("next friday"),
            Err(CommandError::InvalidArgument { field: "date", .. })
        ));
        assert!(parse_date("2030-06-01T19:30:00Z").is_ok());
    }

    #[test]
    fn test_edit_args_only_set_fields() {
        let args = EditArgs {
            title: None,
            date: None,
            venue: Some("Green Room".to_string()),
            description: None,
            price: None,
            at: None,
            capacity: None,
            tag: None,
        };
        let update = args.into_update().unwrap();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "venue": "Green Room" })
        );
    }

    #[test]
    fn test_narrow_by_tag_and_date() {
        let events: Vec<Event> = serde_json::from_value(json!([
            { "_id": "a", "tag": "music", "date": "2030-01-01" },
            { "_id": "b", "tag": "music", "date": "2020-01-01" },
            { "_id": "c", "tag": "sports", "date": "2030-01-01" },
        ]))
        .unwrap();
        let args = ListArgs {
            tag: Some("Music".to_string()),
            upcoming: true,
            ..list_args()
        };
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let ids: Vec<String> = narrow(events, &args, today)
            .into_iter()
            .map(|e| e.id.into_inner())
            .collect();
        assert_eq!(ids, vec!["a"]);
    }
}
