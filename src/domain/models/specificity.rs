//! Specificity analysis result model.

use serde::{Deserialize, Serialize};

use crate::domain::clamp::{clamp01, clamp_temperature};

/// How precisely a request constrains the desired output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecificityMode {
    /// Vague request; generation should explore broadly.
    Exploratory,
    /// Middling constraints.
    Balanced,
    /// Tightly constrained request; generation should stay close to it.
    Specific,
}

impl SpecificityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exploratory => "exploratory",
            Self::Balanced => "balanced",
            Self::Specific => "specific",
        }
    }
}

/// One contributing factor in a specificity score, kept for explainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreFactor {
    /// Short factor name (e.g. "descriptor_density").
    pub name: String,
    /// Signed contribution to the pre-clamp score.
    pub contribution: f64,
    /// Human-readable explanation of why the factor fired.
    pub explanation: String,
}

impl ScoreFactor {
    pub fn new(
        name: impl Into<String>,
        contribution: f64,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            contribution,
            explanation: explanation.into(),
        }
    }
}

/// Result of analyzing a design command's specificity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecificityResult {
    /// Specificity score in [0, 1].
    pub score: f64,
    /// Creativity temperature in [0.3, 1.2], decreasing in score.
    pub temperature: f64,
    /// Derived generation mode.
    pub mode: SpecificityMode,
    /// Ordered factor breakdown, in the order factors were evaluated.
    pub factors: Vec<ScoreFactor>,
}

impl SpecificityResult {
    /// Build a result from a raw (unclamped) score and its factors.
    ///
    /// Applies the score clamp, the affine temperature map, and the mode
    /// thresholds in one place so every caller gets consistent bounds.
    pub fn from_raw_score(
        raw_score: f64,
        factors: Vec<ScoreFactor>,
        exploratory_threshold: f64,
        specific_threshold: f64,
    ) -> Self {
        let score = clamp01(raw_score);
        let temperature = clamp_temperature(1.2 - 0.9 * score);
        let mode = if score < exploratory_threshold {
            SpecificityMode::Exploratory
        } else if score > specific_threshold {
            SpecificityMode::Specific
        } else {
            SpecificityMode::Balanced
        };
        Self {
            score,
            temperature,
            mode,
            factors,
        }
    }

    /// Default result used when the command is malformed or the parser
    /// failed upstream. Specificity analysis must never block generation.
    pub fn fallback() -> Self {
        Self {
            score: 0.5,
            temperature: 0.75,
            mode: SpecificityMode::Balanced,
            factors: vec![ScoreFactor::new(
                "fallback",
                0.5,
                "command text was empty or unparseable; using balanced defaults",
            )],
        }
    }
}
