//! Repository for the `bookings` table.

use sqlx::PgPool;

use bistro_core::types::DbId;

use crate::models::booking::{Booking, CreateBooking};

/// Column list for `bookings` queries. `user` needs quoting: it is a
/// reserved word in PostgreSQL.
const COLUMNS: &str = r#"id, restaurant_id, "user", people, when_ts, created_at"#;

/// Persistence operations for bookings. Rows are insert-only.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a booking and return the persisted row including its
    /// store-assigned id and creation timestamp.
    pub async fn create(pool: &PgPool, input: &CreateBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            r#"INSERT INTO bookings (restaurant_id, "user", people, when_ts)
               VALUES ($1, $2, $3, $4)
               RETURNING {COLUMNS}"#
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.restaurant_id)
            .bind(&input.user)
            .bind(input.people)
            .bind(input.when)
            .fetch_one(pool)
            .await
    }

    /// Fetch a single booking by id. `None` is a normal outcome.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all bookings in store order. The coordinator does not sort,
    /// filter, or paginate; callers needing that layer it externally.
    pub async fn list(pool: &PgPool) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings");
        sqlx::query_as::<_, Booking>(&query).fetch_all(pool).await
    }
}
