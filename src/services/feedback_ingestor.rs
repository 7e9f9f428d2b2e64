//! Feedback ingestion: turns observed outcomes into Beta parameter updates.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{FeedbackApplication, FeedbackConfig, FeedbackEvent};
use crate::domain::ports::StyleTagRepository;

/// Applies feedback events to the style tag store.
///
/// The repository provides the transactional, idempotent write; this service
/// adds validation, bounded retry on conflict, and logging. Ingestion runs
/// after generation completes and must never crash the generation path.
pub struct FeedbackIngestor<R: StyleTagRepository> {
    repository: Arc<R>,
    config: FeedbackConfig,
}

impl<R: StyleTagRepository> FeedbackIngestor<R> {
    pub fn new(repository: Arc<R>, config: FeedbackConfig) -> Self {
        Self { repository, config }
    }

    /// Ingest one feedback event.
    ///
    /// Duplicate event ids are a no-op. Optimistic-concurrency conflicts are
    /// retried up to the configured bound before surfacing as a persistence
    /// error; the caller decides whether to retry the whole event.
    pub async fn ingest(&self, event: &FeedbackEvent) -> DomainResult<FeedbackApplication> {
        event
            .validate()
            .map_err(DomainError::ValidationFailed)?;

        let mut attempts = 0;
        loop {
            match self.repository.record_feedback(event).await {
                Ok(FeedbackApplication::Duplicate) => {
                    info!(event_id = %event.event_id, "duplicate feedback event ignored");
                    return Ok(FeedbackApplication::Duplicate);
                }
                Ok(FeedbackApplication::Applied) => {
                    info!(
                        event_id = %event.event_id,
                        user_id = %event.user_id,
                        outcome = event.outcome.as_str(),
                        strength = event.strength,
                        tags = event.applied_tags.len(),
                        "feedback applied"
                    );
                    return Ok(FeedbackApplication::Applied);
                }
                Err(DomainError::ConcurrencyConflict { user_id, tag_id }) => {
                    attempts += 1;
                    if attempts >= self.config.max_retries {
                        warn!(
                            event_id = %event.event_id,
                            attempts,
                            "feedback retries exhausted"
                        );
                        return Err(DomainError::FeedbackRetriesExhausted(event.event_id));
                    }
                    warn!(
                        event_id = %event.event_id,
                        user_id = %user_id,
                        tag_id = %tag_id,
                        attempt = attempts,
                        "concurrent update conflict, retrying"
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }
}
