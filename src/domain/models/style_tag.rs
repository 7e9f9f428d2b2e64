//! Style tag model: per-(user, tag) Beta belief state for the bandit.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::clamp::floor_beta_param;

/// Category of a style modifier.
///
/// Categories drive both the diversity cap during selection and the section
/// a modifier lands in during prompt assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    Aesthetic,
    Color,
    Fabric,
    Construction,
    Lighting,
    Background,
    Other,
}

impl TagCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aesthetic => "aesthetic",
            Self::Color => "color",
            Self::Fabric => "fabric",
            Self::Construction => "construction",
            Self::Lighting => "lighting",
            Self::Background => "background",
            Self::Other => "other",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "aesthetic" => Some(Self::Aesthetic),
            "color" => Some(Self::Color),
            "fabric" => Some(Self::Fabric),
            "construction" => Some(Self::Construction),
            "lighting" => Some(Self::Lighting),
            "background" => Some(Self::Background),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Persistent Beta belief state for one (user, tag) pair.
///
/// Invariant: `alpha >= 1` and `beta >= 1` at all times. The pair starts at
/// the uniform prior (1, 1) and moves only through feedback ingestion or
/// decay; decay multiplies both parameters toward the prior, never below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleTag {
    pub user_id: String,
    pub tag_id: String,
    pub category: TagCategory,
    /// Success pseudo-count (Beta alpha).
    pub alpha: f64,
    /// Failure pseudo-count (Beta beta).
    pub beta: f64,
    pub updated_at: DateTime<Utc>,
}

impl StyleTag {
    /// Fresh tag at the uniform prior, used for cold starts.
    pub fn fresh(
        user_id: impl Into<String>,
        tag_id: impl Into<String>,
        category: TagCategory,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            tag_id: tag_id.into(),
            category,
            alpha: 1.0,
            beta: 1.0,
            updated_at: Utc::now(),
        }
    }

    /// Expected success probability under the current belief.
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Total evidence accumulated beyond the prior.
    pub fn evidence(&self) -> f64 {
        (self.alpha - 1.0) + (self.beta - 1.0)
    }

    /// Whether this record has gone untouched past the decay window.
    pub fn is_stale(&self, decay_window: Duration, now: DateTime<Utc>) -> bool {
        now - self.updated_at > decay_window
    }

    /// Return a copy with decay applied if the record is stale.
    ///
    /// Both parameters are multiplied by `decay_factor` and floored at 1.0,
    /// so stale preferences regress toward the uniform prior without being
    /// destroyed. Fresh records pass through unchanged.
    pub fn decayed(
        &self,
        decay_window: Duration,
        decay_factor: f64,
        now: DateTime<Utc>,
    ) -> Self {
        if !self.is_stale(decay_window, now) {
            return self.clone();
        }
        Self {
            alpha: floor_beta_param(self.alpha * decay_factor),
            beta: floor_beta_param(self.beta * decay_factor),
            ..self.clone()
        }
    }
}
