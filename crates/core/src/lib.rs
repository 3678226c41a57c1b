//! BookMyEvent Core - Shared domain types.
//!
//! This crate provides the types used across all BookMyEvent components:
//! - `client` - REST client, session store and booking check
//! - `cli` - Command-line front end (`bme`)
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no session storage. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, prices, coordinates, tags and dates
//! - [`models`] - Wire models for users, events and tickets

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
