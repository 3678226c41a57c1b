//! Free-text event category labels.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a [`Tag`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagError {
    /// The input is empty after trimming.
    #[error("tag cannot be empty")]
    Empty,
}

/// A category label attached to an event for filtering.
///
/// Tags keep the spelling they were created with but compare
/// case-insensitively via [`Tag::matches`]. Decoding applies the same
/// validation as [`Tag::parse`], so a blank tag never exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Parse a tag, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Empty`] for blank input.
    pub fn parse(s: &str) -> Result<Self, TagError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TagError::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// The tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison, ignoring surrounding whitespace.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.trim().eq_ignore_ascii_case(other.trim())
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Tag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_ignores_case() {
        let tag = Tag::parse(" Music ").unwrap();
        assert_eq!(tag.as_str(), "Music");
        assert!(tag.matches("music"));
        assert!(tag.matches("MUSIC "));
        assert!(!tag.matches("musical"));
    }

    #[test]
    fn test_blank_rejected() {
        assert_eq!(Tag::parse("\t"), Err(TagError::Empty));
    }

    #[test]
    fn test_deserialize_validates() {
        let tag: Tag = serde_json::from_str("\" jazz \"").unwrap();
        assert_eq!(tag.as_str(), "jazz");
        assert!(serde_json::from_str::<Tag>("\"  \"").is_err());
    }
}
