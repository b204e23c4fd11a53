//! Integration tests for the restaurant cache projection.
//!
//! Applies decoded events against a real database and checks that the cache
//! converges: redelivered creations are idempotent, newer snapshots win, and
//! deletions tolerate rows that were never cached.

use sqlx::PgPool;

use bistro_db::repositories::RestaurantCacheRepo;
use bistro_events::projector::apply;
use bistro_events::{RestaurantEvent, RestaurantSnapshot};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn created(id: i64, name: &str, city: &str, seats: i32) -> RestaurantEvent {
    RestaurantEvent::Created(RestaurantSnapshot {
        id,
        name: name.to_string(),
        city: city.to_string(),
        seats,
    })
}

// ---------------------------------------------------------------------------
// Test: creation events populate the cache
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_created_event_caches_restaurant(pool: PgPool) {
    apply(&pool, &created(5, "Chez Nous", "Lyon", 40))
        .await
        .unwrap();

    let entry = RestaurantCacheRepo::get(&pool, 5)
        .await
        .unwrap()
        .expect("restaurant should be cached");
    assert_eq!(entry.id, 5);
    assert_eq!(entry.name, "Chez Nous");
    assert_eq!(entry.city, "Lyon");
    assert_eq!(entry.seats, 40);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_redelivered_create_is_idempotent(pool: PgPool) {
    let event = created(5, "Chez Nous", "Lyon", 40);

    // At-least-once delivery means the same record can arrive twice.
    apply(&pool, &event).await.unwrap();
    apply(&pool, &event).await.unwrap();

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM restaurant_cache")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let entry = RestaurantCacheRepo::get(&pool, 5).await.unwrap().unwrap();
    assert_eq!(entry.name, "Chez Nous");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_newer_snapshot_overwrites_cached_row(pool: PgPool) {
    apply(&pool, &created(5, "Old Name", "Lyon", 20)).await.unwrap();
    apply(&pool, &created(5, "New Name", "Paris", 60)).await.unwrap();

    let entry = RestaurantCacheRepo::get(&pool, 5).await.unwrap().unwrap();
    assert_eq!(entry.name, "New Name");
    assert_eq!(entry.city, "Paris");
    assert_eq!(entry.seats, 60);
}

// ---------------------------------------------------------------------------
// Test: deletion events evict exactly the named restaurant
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deleted_event_evicts_only_that_restaurant(pool: PgPool) {
    apply(&pool, &created(5, "Doomed", "Lyon", 10)).await.unwrap();
    apply(&pool, &created(6, "Survivor", "Nice", 30)).await.unwrap();

    apply(&pool, &RestaurantEvent::Deleted(5)).await.unwrap();

    assert!(RestaurantCacheRepo::get(&pool, 5).await.unwrap().is_none());
    assert!(RestaurantCacheRepo::get(&pool, 6).await.unwrap().is_some());
}

/// The full lifecycle for one restaurant converges to "absent" no matter
/// what unrelated events are interleaved with it.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_update_delete_sequence_leaves_no_entry(pool: PgPool) {
    apply(&pool, &created(5, "A", "Lyon", 10)).await.unwrap();
    apply(&pool, &created(8, "Bystander", "Nice", 50)).await.unwrap();
    apply(&pool, &created(5, "B", "Lyon", 12)).await.unwrap();
    apply(&pool, &RestaurantEvent::Deleted(9)).await.unwrap();
    apply(&pool, &RestaurantEvent::Deleted(5)).await.unwrap();

    assert!(RestaurantCacheRepo::get(&pool, 5).await.unwrap().is_none());

    let entry = RestaurantCacheRepo::get(&pool, 8).await.unwrap().unwrap();
    assert_eq!(entry.name, "Bystander");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_for_uncached_restaurant_is_noop(pool: PgPool) {
    // Nothing cached yet; the deletion must succeed so the offset commits.
    apply(&pool, &RestaurantEvent::Deleted(99)).await.unwrap();

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM restaurant_cache")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_event_changes_nothing(pool: PgPool) {
    apply(&pool, &created(5, "Steady", "Lyon", 25)).await.unwrap();

    apply(&pool, &RestaurantEvent::Unknown("restaurant.renamed".to_string()))
        .await
        .unwrap();

    let entry = RestaurantCacheRepo::get(&pool, 5).await.unwrap().unwrap();
    assert_eq!(entry.name, "Steady");
}

// ---------------------------------------------------------------------------
// Test: raw wire payloads flow through decode and apply
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_wire_payload_applies_end_to_end(pool: PgPool) {
    let create = RestaurantEvent::decode(
        br#"{"type": "restaurant.created", "data": {"id": 7, "name": "Wire", "city": "Nantes", "seats": 12}}"#,
    )
    .unwrap();
    apply(&pool, &create).await.unwrap();
    assert!(RestaurantCacheRepo::get(&pool, 7).await.unwrap().is_some());

    // The upstream producer encodes deletion ids as strings.
    let delete =
        RestaurantEvent::decode(br#"{"type": "restaurant.deleted", "data": {"id": "7"}}"#).unwrap();
    apply(&pool, &delete).await.unwrap();
    assert!(RestaurantCacheRepo::get(&pool, 7).await.unwrap().is_none());
}
