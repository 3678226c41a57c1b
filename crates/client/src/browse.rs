//! Narrowing the event list: by tag, by distance from a point, by date.

use bookmyevent_core::{Coordinates, Event};
use chrono::NaiveDate;

/// Events carrying `tag` (case-insensitive), in their original order.
#[must_use]
pub fn filter_by_tag<'a>(events: &'a [Event], tag: &str) -> Vec<&'a Event> {
    events.iter().filter(|event| event.has_tag(tag)).collect()
}

/// Events within `radius_km` of `center`, nearest first, with their distance.
///
/// Events without usable coordinates are left out.
#[must_use]
pub fn nearby<'a>(events: &'a [Event], center: &Coordinates, radius_km: f64) -> Vec<(&'a Event, f64)> {
    let mut found: Vec<(&Event, f64)> = events
        .iter()
        .filter_map(|event| {
            let distance = event.coordinates()?.distance_km(center);
            (distance <= radius_km).then_some((event, distance))
        })
        .collect();
    found.sort_by(|a, b| a.1.total_cmp(&b.1));
    found
}

/// Events on or after `today`, soonest first. Undated events are left out.
#[must_use]
pub fn upcoming(events: &[Event], today: NaiveDate) -> Vec<&Event> {
    let mut found: Vec<(&Event, NaiveDate)> = events
        .iter()
        .filter_map(|event| {
            let day = event.date.as_ref()?.day()?;
            (day >= today).then_some((event, day))
        })
        .collect();
    found.sort_by_key(|(_, day)| *day);
    found.into_iter().map(|(event, _)| event).collect()
}
