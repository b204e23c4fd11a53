//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and, where the API accepts writes, a `Deserialize`
//! create DTO.

pub mod booking;
pub mod restaurant;
