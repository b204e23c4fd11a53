//! Request handlers for the coordinator's HTTP surface.
//!
//! Each submodule provides async handler functions plus a `router()` builder
//! mounting them. Handlers delegate to the repositories in `bistro_db` and
//! map errors via [`crate::error::AppError`].

pub mod booking;
pub mod health;
