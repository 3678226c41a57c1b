//! Event dates as the backend stores them.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// The date of an event.
///
/// The backend stores whatever the create form sent, usually `YYYY-MM-DD` or
/// a full RFC 3339 timestamp. The raw string is kept verbatim so an edit
/// never rewrites a date the client could not understand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventDate(String);

impl EventDate {
    /// Wrap a raw date string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Build from a calendar day, serialized as `YYYY-MM-DD`.
    #[must_use]
    pub fn from_day(day: NaiveDate) -> Self {
        Self(day.format("%Y-%m-%d").to_string())
    }

    /// The raw string as received.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The calendar day, if the raw string is RFC 3339 or `YYYY-MM-DD`.
    #[must_use]
    pub fn day(&self) -> Option<NaiveDate> {
        let raw = self.0.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .ok()
    }

    /// Human form, e.g. "March 7, 2025". Unparseable dates are shown as-is.
    #[must_use]
    pub fn display_long(&self) -> String {
        self.day().map_or_else(
            || self.0.clone(),
            |day| day.format("%B %-d, %Y").to_string(),
        )
    }
}

impl std::fmt::Display for EventDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_long())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_day() {
        let date = EventDate::new("2025-03-07");
        assert_eq!(date.day(), NaiveDate::from_ymd_opt(2025, 3, 7));
        assert_eq!(date.to_string(), "March 7, 2025");
    }

    #[test]
    fn test_rfc3339_timestamp() {
        let date = EventDate::new("2024-12-31T18:30:00.000Z");
        assert_eq!(date.display_long(), "December 31, 2024");
    }

    #[test]
    fn test_unparseable_kept_verbatim() {
        let date = EventDate::new("next friday");
        assert!(date.day().is_none());
        assert_eq!(date.to_string(), "next friday");
    }

    #[test]
    fn test_from_day() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        assert_eq!(EventDate::from_day(day).as_str(), "2026-01-02");
    }
}
