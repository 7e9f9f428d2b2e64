//! Feedback event model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::clamp::clamp_strength;
use crate::domain::models::AppliedTag;

/// Observed outcome of a generated design.
///
/// Explicit likes/dislikes, implicit dwell/discard signals, and validation
/// pass/fail all reduce to one of these three at the ingestion boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackOutcome {
    Positive,
    Negative,
    Neutral,
}

impl FeedbackOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

/// One feedback signal tied to a prior prompt assembly.
///
/// `event_id` is the idempotency key: the caller supplies it, and ingesting
/// the same id twice is a no-op. Applied tags are carried over verbatim from
/// the originating [`crate::domain::models::PromptAssembly`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub event_id: Uuid,
    pub user_id: String,
    /// Tags from the originating assembly's applied set.
    pub applied_tags: Vec<AppliedTag>,
    pub outcome: FeedbackOutcome,
    /// Signal strength in (0, 1]. Partial-credit signals (e.g. a validation
    /// score of 0.4) land here; defaults to 1.0.
    pub strength: f64,
    pub observed_at: DateTime<Utc>,
}

impl FeedbackEvent {
    pub fn new(
        event_id: Uuid,
        user_id: impl Into<String>,
        applied_tags: Vec<AppliedTag>,
        outcome: FeedbackOutcome,
    ) -> Self {
        Self {
            event_id,
            user_id: user_id.into(),
            applied_tags,
            outcome,
            strength: 1.0,
            observed_at: Utc::now(),
        }
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = clamp_strength(strength);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.user_id.trim().is_empty() {
            return Err("feedback event user_id cannot be empty".to_string());
        }
        if !(self.strength > 0.0 && self.strength <= 1.0) {
            return Err(format!(
                "feedback strength must be in (0, 1], got {}",
                self.strength
            ));
        }
        Ok(())
    }
}

/// Result of attempting to apply a feedback event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackApplication {
    /// Event was new and its updates were applied.
    Applied,
    /// Event id was seen before; nothing changed.
    Duplicate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TagCategory;

    fn applied(tag_id: &str) -> AppliedTag {
        AppliedTag {
            tag_id: tag_id.to_string(),
            category: TagCategory::Color,
            weight: 0.5,
            sampled_score: 0.5,
            brand_biased: false,
        }
    }

    #[test]
    fn test_strength_clamped_on_builder() {
        let event = FeedbackEvent::new(
            Uuid::new_v4(),
            "user-1",
            vec![applied("navy-blue")],
            FeedbackOutcome::Positive,
        )
        .with_strength(3.0);
        assert_eq!(event.strength, 1.0);
    }

    #[test]
    fn test_validate_rejects_empty_user() {
        let event = FeedbackEvent::new(Uuid::new_v4(), "", vec![], FeedbackOutcome::Neutral);
        assert!(event.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_strength() {
        let mut event = FeedbackEvent::new(
            Uuid::new_v4(),
            "user-1",
            vec![applied("navy-blue")],
            FeedbackOutcome::Positive,
        );
        event.strength = 0.0;
        assert!(event.validate().is_err());
    }

    #[test]
    fn test_outcome_round_trip() {
        for outcome in [
            FeedbackOutcome::Positive,
            FeedbackOutcome::Negative,
            FeedbackOutcome::Neutral,
        ] {
            assert_eq!(FeedbackOutcome::from_str(outcome.as_str()), Some(outcome));
        }
    }
}
