//! Domain errors for the atelier prompt synthesis engine.

use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors surfaced by the engine.
///
/// Missing personalization data (no brand profile, no tag history) is never
/// an error: those paths recover through cold-start defaults. The variants
/// here cover the failures the caller genuinely needs to see, chiefly
/// persistence being unavailable during feedback ingestion.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Concurrency conflict: style tag {user_id}/{tag_id} was modified")]
    ConcurrencyConflict { user_id: String, tag_id: String },

    #[error("Feedback event {0} could not be applied after retries")]
    FeedbackRetriesExhausted(Uuid),

    #[error("Style tag not found: {user_id}/{tag_id}")]
    StyleTagNotFound { user_id: String, tag_id: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
