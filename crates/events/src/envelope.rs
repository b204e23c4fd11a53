//! Wire envelopes for both asynchronous transports.
//!
//! Inbound: the restaurant service produces JSON envelopes
//! `{"type": ..., "data": ...}` on the event stream. Decoding is tolerant —
//! unknown types are preserved as [`RestaurantEvent::Unknown`] so the
//! projector can skip them, and ids are accepted as numbers or numeric
//! strings (the upstream producer is stringly-typed for deletions).
//!
//! Outbound: [`NotificationMessage`] is the payload placed on the
//! notification queue for every successful booking.

use serde::{Deserialize, Deserializer, Serialize};

use bistro_core::contracts::{
    EVENT_BOOKING_CREATED, EVENT_RESTAURANT_CREATED, EVENT_RESTAURANT_DELETED,
};
use bistro_core::types::DbId;
use bistro_db::models::booking::Booking;

/// Envelope shape shared by every record on the restaurant topic.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Full restaurant snapshot carried by a creation event.
///
/// Attributes other than the id default to zero values when absent, matching
/// the producer's loose contract.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RestaurantSnapshot {
    #[serde(deserialize_with = "lenient_id")]
    pub id: DbId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub seats: i32,
}

#[derive(Debug, Deserialize)]
struct DeletedPayload {
    #[serde(deserialize_with = "lenient_id")]
    id: DbId,
}

/// A decoded restaurant lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub enum RestaurantEvent {
    /// Upsert the cache row from the embedded snapshot.
    Created(RestaurantSnapshot),
    /// Remove the cache row for this restaurant id.
    Deleted(DbId),
    /// A type this coordinator does not know about; applied as a no-op.
    Unknown(String),
}

impl RestaurantEvent {
    /// Decode a raw stream record.
    ///
    /// Fails on malformed JSON or on a known type whose payload is missing
    /// its restaurant id; the caller skips such records.
    pub fn decode(payload: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: RawEnvelope = serde_json::from_slice(payload)?;
        match raw.kind.as_str() {
            EVENT_RESTAURANT_CREATED => {
                let snapshot: RestaurantSnapshot = serde_json::from_value(raw.data)?;
                Ok(Self::Created(snapshot))
            }
            EVENT_RESTAURANT_DELETED => {
                let payload: DeletedPayload = serde_json::from_value(raw.data)?;
                Ok(Self::Deleted(payload.id))
            }
            _ => Ok(Self::Unknown(raw.kind)),
        }
    }
}

/// Accept a restaurant id as either a JSON number or a numeric string.
fn lenient_id<'de, D>(deserializer: D) -> Result<DbId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Number(i64),
        Text(String),
    }

    match IdRepr::deserialize(deserializer)? {
        IdRepr::Number(n) => Ok(n),
        IdRepr::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// Outbound queue payload: `{"type": "booking.created", "data": <booking>}`.
#[derive(Debug, Serialize)]
pub struct NotificationMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    data: &'a Booking,
}

impl<'a> NotificationMessage<'a> {
    /// Wrap a persisted booking as a `booking.created` message.
    pub fn booking_created(booking: &'a Booking) -> Self {
        Self {
            kind: EVENT_BOOKING_CREATED,
            data: booking,
        }
    }
}
