//! Asynchronous transport layer for the booking coordinator.
//!
//! Two independent components live here:
//!
//! - [`CacheProjector`] — long-lived consumer of the restaurant event stream
//!   that materializes the local `restaurant_cache` projection.
//! - [`NotificationPublisher`] — bounded, fire-and-forget emitter of
//!   `booking.created` messages onto the durable notification queue.
//!
//! Neither component shares in-process state with the HTTP layer; all
//! coordination goes through the database pool.

pub mod envelope;
pub mod notifier;
pub mod projector;

pub use envelope::{NotificationMessage, RestaurantEvent, RestaurantSnapshot};
pub use notifier::{MetricsSnapshot, NotificationPublisher, NotifierConfig, PublisherMetrics};
pub use projector::{CacheProjector, ProjectorConfig};
