//! Core types for BookMyEvent.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod date;
pub mod email;
pub mod geo;
pub mod id;
pub mod price;
pub mod role;
pub mod tag;

pub use date::EventDate;
pub use email::{Email, EmailError};
pub use geo::{Coordinates, CoordinatesError};
pub use id::*;
pub use price::{Price, PriceError};
pub use role::Role;
pub use tag::{Tag, TagError};
