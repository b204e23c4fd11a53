//! Repository for the `restaurant_cache` projection table.
//!
//! Every method is idempotent so the projector can safely reapply records
//! after an at-least-once redelivery.

use sqlx::PgPool;

use bistro_core::types::DbId;

use crate::models::restaurant::RestaurantCacheEntry;

/// Column list for `restaurant_cache` queries.
const COLUMNS: &str = "id, name, city, seats, last_seen";

/// Persistence operations for the restaurant read cache.
pub struct RestaurantCacheRepo;

impl RestaurantCacheRepo {
    /// Insert or replace the cache row for a restaurant (last-write-wins).
    ///
    /// Reapplying the same creation event leaves the row's attributes
    /// unchanged and only refreshes `last_seen`.
    pub async fn upsert(
        pool: &PgPool,
        id: DbId,
        name: &str,
        city: &str,
        seats: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO restaurant_cache (id, name, city, seats, last_seen) \
             VALUES ($1, $2, $3, $4, NOW()) \
             ON CONFLICT (id) DO UPDATE \
             SET name = EXCLUDED.name, city = EXCLUDED.city, \
                 seats = EXCLUDED.seats, last_seen = NOW()",
        )
        .bind(id)
        .bind(name)
        .bind(city)
        .bind(seats)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete the cache row for a restaurant.
    ///
    /// Returns `true` if a row was removed; deleting an absent row is a
    /// no-op, not an error.
    pub async fn remove(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM restaurant_cache WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch a cache entry by restaurant id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<RestaurantCacheEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM restaurant_cache WHERE id = $1");
        sqlx::query_as::<_, RestaurantCacheEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
