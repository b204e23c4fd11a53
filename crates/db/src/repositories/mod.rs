//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod booking_repo;
pub mod restaurant_cache_repo;

pub use booking_repo::BookingRepo;
pub use restaurant_cache_repo::RestaurantCacheRepo;
