//! Ticket price using decimal arithmetic.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a [`Price`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("price must be a number: {0}")]
    NotANumber(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// Ticket price in the backend's single (implicit) currency.
///
/// The event form historically posted the price as a string, so the wire
/// format accepts both JSON numbers and numeric strings. It is always sent
/// back as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A free event.
    pub const FREE: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether attendance costs nothing.
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::FREE);
        }
        let amount = Decimal::from_str(s).map_err(|_| PriceError::NotANumber(s.to_owned()))?;
        Self::new(amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }

        let amount = match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Decimal::from(n),
            Raw::Float(x) => Decimal::try_from(x).map_err(serde::de::Error::custom)?,
            Raw::Text(s) => return s.parse().map_err(serde::de::Error::custom),
        };
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_number_and_string() {
        let a: Price = serde_json::from_str("25").unwrap();
        let b: Price = serde_json::from_str("\"25.00\"").unwrap();
        let c: Price = serde_json::from_str("12.5").unwrap();
        assert_eq!(a, b);
        assert_eq!(c.to_string(), "12.50");
    }

    #[test]
    fn test_empty_string_is_free() {
        let p: Price = serde_json::from_str("\"\"").unwrap();
        assert!(p.is_free());
    }

    #[test]
    fn test_rejects_negative_and_garbage() {
        assert_eq!("-1".parse::<Price>(), Err(PriceError::Negative));
        assert!(matches!(
            "ten".parse::<Price>(),
            Err(PriceError::NotANumber(_))
        ));
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let p: Price = "9.99".parse().unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"9.99\"");
    }
}
