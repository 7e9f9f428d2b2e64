//! Specificity analysis: how tightly a request constrains the output.
//!
//! Pure and deterministic; no I/O. The score feeds the creativity
//! temperature, which in turn controls how aggressively the bandit explores.

use tracing::debug;

use crate::domain::models::{
    DesignCommand, ScoreFactor, SpecificityConfig, SpecificityResult,
};

// Quantity boosts: a request for exactly one design is far more constrained
// than a request for a batch.
const SINGLE_QUANTITY_BONUS: f64 = 0.3;
const SMALL_BATCH_BONUS: f64 = 0.2;
const MEDIUM_BATCH_BONUS: f64 = 0.1;

/// Scores design commands for specificity and derives the creativity
/// temperature. See [`SpecificityConfig`] for the tuning knobs.
#[derive(Debug, Clone, Default)]
pub struct SpecificityAnalyzer {
    config: SpecificityConfig,
}

impl SpecificityAnalyzer {
    pub fn new(config: SpecificityConfig) -> Self {
        Self { config }
    }

    /// Analyze a command.
    ///
    /// A malformed command (empty raw text) yields the balanced fallback
    /// result rather than an error; specificity analysis must never block
    /// prompt generation.
    pub fn analyze(&self, command: &DesignCommand) -> SpecificityResult {
        if command.is_malformed() {
            debug!("malformed command text, using fallback specificity");
            return SpecificityResult::fallback();
        }

        let mut factors = Vec::new();
        let mut score = 0.0;

        score += self.descriptor_density(command, &mut factors);
        score += Self::quantity_boost(command.quantity, &mut factors);
        score += self.lexical_precision(&command.raw_text, &mut factors);
        score += self.technical_vocabulary(&command.raw_text, &mut factors);

        let result = SpecificityResult::from_raw_score(
            score,
            factors,
            self.config.exploratory_threshold,
            self.config.specific_threshold,
        );
        debug!(
            score = result.score,
            temperature = result.temperature,
            mode = result.mode.as_str(),
            "specificity analyzed"
        );
        result
    }

    /// Each populated descriptor bucket contributes once, capped so that a
    /// fully described request still leaves room for the other factors.
    fn descriptor_density(&self, command: &DesignCommand, factors: &mut Vec<ScoreFactor>) -> f64 {
        let buckets = command.attributes.descriptor_bucket_count();
        let contribution =
            (self.config.descriptor_weight * buckets as f64).min(self.config.descriptor_cap);
        factors.push(ScoreFactor::new(
            "descriptor_density",
            contribution,
            format!("{buckets} populated descriptor bucket(s)"),
        ));
        contribution
    }

    fn quantity_boost(quantity: u32, factors: &mut Vec<ScoreFactor>) -> f64 {
        let (contribution, explanation) = match quantity {
            0 => (0.0, "quantity unspecified".to_string()),
            1 => (SINGLE_QUANTITY_BONUS, "single design requested".to_string()),
            2..=5 => (SMALL_BATCH_BONUS, format!("small batch of {quantity}")),
            6..=10 => (MEDIUM_BATCH_BONUS, format!("medium batch of {quantity}")),
            _ => (0.0, format!("large batch of {quantity}")),
        };
        factors.push(ScoreFactor::new("quantity", contribution, explanation));
        contribution
    }

    /// Vague and precise lexicon checks are independent; a command may fire
    /// both ("exactly ten varied dresses").
    fn lexical_precision(&self, raw_text: &str, factors: &mut Vec<ScoreFactor>) -> f64 {
        let text = raw_text.to_lowercase();
        let mut contribution = 0.0;

        if let Some(term) = self
            .config
            .vague_lexicon
            .iter()
            .find(|term| text.contains(term.as_str()))
        {
            contribution -= self.config.vague_penalty;
            factors.push(ScoreFactor::new(
                "vague_language",
                -self.config.vague_penalty,
                format!("vague term \"{term}\""),
            ));
        }

        if let Some(term) = self
            .config
            .precise_lexicon
            .iter()
            .find(|term| text.contains(term.as_str()))
        {
            contribution += self.config.precise_bonus;
            factors.push(ScoreFactor::new(
                "precise_language",
                self.config.precise_bonus,
                format!("precise term \"{term}\""),
            ));
        }

        contribution
    }

    fn technical_vocabulary(&self, raw_text: &str, factors: &mut Vec<ScoreFactor>) -> f64 {
        let text = raw_text.to_lowercase();
        let matched: Vec<&str> = self
            .config
            .technical_lexicon
            .iter()
            .filter(|term| text.contains(term.as_str()))
            .map(String::as_str)
            .collect();

        let contribution = self.config.technical_weight * matched.len() as f64;
        if !matched.is_empty() {
            factors.push(ScoreFactor::new(
                "technical_vocabulary",
                contribution,
                format!("technical term(s): {}", matched.join(", ")),
            ));
        }
        contribution
    }
}
