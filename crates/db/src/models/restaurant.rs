//! Restaurant cache entity model.

use bistro_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `restaurant_cache` table.
///
/// Presence means "last known state says this restaurant exists"; absence
/// means deleted or never observed. The row is a possibly-lagging projection,
/// never the system of record.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct RestaurantCacheEntry {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub seats: i32,
    pub last_seen: Timestamp,
}
