//! Events and the request bodies that create or edit them.

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::lenient;
use crate::types::{Coordinates, EventDate, EventId, Price, Tag, UserId};

/// An event as listed by `GET /event/all` and `GET /event`.
///
/// Only `_id` is required. Every other field decodes leniently: a `null` or
/// malformed value reads as empty rather than rejecting the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: EventId,
    /// Headline.
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    /// Long-form description.
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    /// When the event takes place.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub date: Option<EventDate>,
    /// Where the event takes place.
    #[serde(default, deserialize_with = "lenient::text")]
    pub venue: String,
    /// Ticket price; `None` when missing or not a valid amount.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub price: Option<Price>,
    /// Map latitude.
    #[serde(default, deserialize_with = "lenient::float")]
    pub latitude: Option<f64>,
    /// Map longitude.
    #[serde(default, deserialize_with = "lenient::float")]
    pub longitude: Option<f64>,
    /// Number of tickets on offer.
    #[serde(default, deserialize_with = "lenient::count")]
    pub capacity: Option<u32>,
    /// Category label; blank tags read as `None`.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub tag: Option<Tag>,
    /// Owner, whether the backend sent a bare id or a populated user.
    #[serde(
        default,
        rename = "createdBy",
        deserialize_with = "deserialize_owner",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_by: Option<UserId>,
}

impl Event {
    /// Map position, if the stored coordinates are present and valid.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::new(self.latitude?, self.longitude?).ok()
    }

    /// Whether the event carries `tag` (case-insensitive).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.as_ref().is_some_and(|t| t.matches(tag))
    }
}

fn deserialize_owner<'de, D: Deserializer<'de>>(d: D) -> Result<Option<UserId>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Owner {
        Id(UserId),
        Populated {
            #[serde(rename = "_id")]
            id: UserId,
        },
    }

    let owner: Option<Owner> = lenient::optional(d)?;
    Ok(owner.map(|owner| match owner {
        Owner::Id(id) | Owner::Populated { id } => id,
    }))
}

/// Body of `POST /event/create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: EventDate,
    pub venue: String,
    pub price: Price,
    /// Defaults to [`Coordinates::DEFAULT_CENTER`], as the map picker did.
    #[serde(flatten)]
    pub location: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<Tag>,
}

impl NewEvent {
    /// Start a new event at the default map position, free, untagged.
    #[must_use]
    pub fn new(title: impl Into<String>, date: EventDate, venue: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            date,
            venue: venue.into(),
            price: Price::FREE,
            location: Coordinates::DEFAULT_CENTER,
            capacity: None,
            tag: None,
        }
    }
}

/// Body of `PUT /event/:id`. Only fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<EventDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(flatten)]
    pub location: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<Tag>,
}

impl EventUpdate {
    /// True when no field would be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
