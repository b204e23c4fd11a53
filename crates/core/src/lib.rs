//! Shared domain types for the bistro booking coordinator.
//!
//! This crate holds the pieces every other crate agrees on: primitive type
//! aliases, the error taxonomy that maps onto HTTP statuses at the API edge,
//! and the wire-contract constants shared with the restaurant service and
//! the notification consumer.

pub mod contracts;
pub mod error;
pub mod types;

pub use error::CoreError;
