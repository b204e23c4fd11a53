//! Booking entity model and create DTO.

use bistro_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `bookings` table.
///
/// The serialized shape is the platform-wide wire contract
/// (`id`, `restaurant_id`, `user`, `people`, `when`); `created_at` is
/// store-assigned bookkeeping and never leaves the service.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub restaurant_id: DbId,
    pub user: String,
    pub people: i32,
    #[sqlx(rename = "when_ts")]
    pub when: Timestamp,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
}

/// DTO for `POST /bookings`.
///
/// `when` accepts any RFC 3339 offset and is normalized to UTC on decode.
/// `user` defaults to empty because the handler overwrites it with the
/// authenticated subject; a value supplied in the body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBooking {
    pub restaurant_id: DbId,
    #[serde(default)]
    pub user: String,
    pub people: i32,
    pub when: Timestamp,
}
