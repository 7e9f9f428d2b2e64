use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::errors::DomainResult;
use crate::domain::models::{FeedbackApplication, FeedbackEvent, StyleTag};

/// Repository trait for per-(user, tag) Beta belief state.
///
/// Rows are partitioned by (user_id, tag_id), so contention across users or
/// tags never arises. Implementations must provide atomic in-place
/// increments for feedback application; a read-then-write in two round trips
/// would lose concurrent updates.
#[async_trait]
pub trait StyleTagRepository: Send + Sync {
    /// Fetch one tag's belief state.
    ///
    /// Returns None when the user has never received feedback on the tag;
    /// callers fall back to the uniform prior.
    async fn get(&self, user_id: &str, tag_id: &str) -> DomainResult<Option<StyleTag>>;

    /// Fetch belief state for many tags at once, keyed by tag id.
    ///
    /// Missing tags are simply absent from the map.
    async fn get_many(
        &self,
        user_id: &str,
        tag_ids: &[String],
    ) -> DomainResult<HashMap<String, StyleTag>>;

    /// Apply a feedback event transactionally.
    ///
    /// Must be idempotent per event id: a duplicate returns
    /// [`FeedbackApplication::Duplicate`] without touching any row. New
    /// events lazily create missing tag rows at the uniform prior, then
    /// adjust alpha (positive) or beta (negative) by the event strength via
    /// atomic in-place increments. Neutral events are recorded for audit
    /// only.
    async fn record_feedback(&self, event: &FeedbackEvent)
        -> DomainResult<FeedbackApplication>;

    /// Persist decay for rows untouched longer than `decay_window`.
    ///
    /// Multiplies alpha and beta by `decay_factor`, flooring both at 1.
    /// Returns the number of rows decayed. Runs off the request path as a
    /// scheduled sweep.
    async fn apply_decay(
        &self,
        decay_window: Duration,
        decay_factor: f64,
        now: DateTime<Utc>,
    ) -> DomainResult<u64>;

    /// Admin-only reset of a tag to the uniform prior.
    async fn reset_tag(&self, user_id: &str, tag_id: &str) -> DomainResult<()>;
}
