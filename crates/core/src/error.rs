use crate::types::DbId;

/// Domain error taxonomy for the coordinator.
///
/// The API layer maps each variant onto exactly one HTTP status class;
/// background components (projector, publisher) log their failures and never
/// let them reach this type.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Client-correctable input failure (400).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Missing, malformed, expired, or forged credential (401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The requested entity does not exist; an expected outcome, not a fault (404).
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The store rejected or timed out a request; retryable by the caller (500).
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
