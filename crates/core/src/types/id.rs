//! Newtype IDs for type-safe entity references.
//!
//! The backend hands out opaque document identifiers (the `_id` field). Use the
//! `define_id!` macro to create wrappers that prevent accidentally mixing IDs
//! from different entity types, e.g. cancelling a ticket with an event ID.

use thiserror::Error;

/// Errors that can occur when parsing an ID from user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    /// The input is empty or only whitespace.
    #[error("{kind} cannot be empty")]
    Empty {
        /// Name of the ID type being parsed.
        kind: &'static str,
    },
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `new()` (unchecked), `parse()` (rejects blank input), `as_str()`
/// - `Display`, `FromStr`, `AsRef<str>` and `From<String>`
///
/// # Example
///
/// ```rust
/// # use bookmyevent_core::define_id;
/// define_id!(VenueId);
/// define_id!(SeatId);
///
/// let venue = VenueId::new("v1");
/// let seat = SeatId::new("v1");
///
/// // These are different types, so this won't compile:
/// // let _: VenueId = seat;
/// # let _ = (venue, seat);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID without validation (for values coming from the backend).
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Parse an ID from user input, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns an error if the input is empty after trimming.
            pub fn parse(s: &str) -> ::core::result::Result<Self, $crate::types::id::IdError> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err($crate::types::id::IdError::Empty {
                        kind: stringify!($name),
                    });
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(EventId);
define_id!(TicketId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let id = EventId::parse("  65a1f0c2e4b0a1  ").unwrap();
        assert_eq!(id.as_str(), "65a1f0c2e4b0a1");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(
            EventId::parse("   "),
            Err(IdError::Empty { kind: "EventId" })
        );
        assert!(TicketId::parse("").is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id: TicketId = serde_json::from_str("\"t-42\"").unwrap();
        assert_eq!(id, TicketId::new("t-42"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"t-42\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(UserId::new("u1").to_string(), "u1");
    }
}
