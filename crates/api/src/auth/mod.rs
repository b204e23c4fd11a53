//! Token verification for the booking endpoints.

pub mod jwt;
