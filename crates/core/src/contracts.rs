//! Wire-contract constants shared with the surrounding platform services.
//!
//! These must match the values the restaurant service uses when producing
//! lifecycle events and the values the notification consumer subscribes to.
//! Changing any of them is a cross-service protocol change.

/// Kafka topic carrying restaurant lifecycle events.
pub const RESTAURANT_TOPIC: &str = "restaurants";

/// Consumer group the coordinator joins, so horizontally scaled replicas
/// split the backlog instead of each replaying it in full.
pub const RESTAURANT_CONSUMER_GROUP: &str = "booking-restaurants-consumer";

/// Envelope type for a restaurant creation event (payload: full snapshot).
pub const EVENT_RESTAURANT_CREATED: &str = "restaurant.created";

/// Envelope type for a restaurant deletion event (payload: bare id).
pub const EVENT_RESTAURANT_DELETED: &str = "restaurant.deleted";

/// JetStream stream holding queued booking notifications.
pub const NOTIFY_STREAM: &str = "NOTIFICATIONS";

/// Subject the notification consumer pulls booking messages from.
pub const NOTIFY_SUBJECT: &str = "notifications.booking";

/// Message type for an outbound booking notification.
pub const EVENT_BOOKING_CREATED: &str = "booking.created";
