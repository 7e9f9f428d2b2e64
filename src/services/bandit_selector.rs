//! Brand-biased Thompson Sampling over the modifier catalog.
//!
//! Each candidate tag carries a Beta(alpha, beta) belief over its success
//! probability for this user. A draw from that belief is combined with a
//! brand-signature bias and a temperature-scaled exploration bonus; the top
//! candidates by combined score become the prompt's modifiers, subject to a
//! per-category diversity cap.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand_distr::{Beta, Distribution};
use tracing::debug;

use crate::domain::clamp::clamp_temperature;
use crate::domain::models::{
    BanditConfig, BrandProfile, CatalogTag, SelectedModifier, StyleTag, TagCategory,
};

/// Scored candidate prior to the diversity-capped cut.
#[derive(Debug, Clone)]
struct ScoredCandidate {
    tag: CatalogTag,
    alpha: f64,
    sampled: f64,
    bias: f64,
    final_score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct BanditSelector {
    config: BanditConfig,
}

impl BanditSelector {
    pub fn new(config: BanditConfig) -> Self {
        Self { config }
    }

    /// Select up to `max_tags` modifiers for one prompt.
    ///
    /// `tag_states` holds the persisted belief per tag id; candidates
    /// without a record are treated as fresh (uniform prior), which gives
    /// untried tags a fair chance. Stale records are decay-adjusted in
    /// memory before sampling so an outdated preference cannot dominate.
    pub fn select<R: Rng + ?Sized>(
        &self,
        user_id: &str,
        candidates: &[CatalogTag],
        tag_states: &HashMap<String, StyleTag>,
        brand_profile: &BrandProfile,
        temperature: f64,
        max_tags: usize,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<SelectedModifier> {
        if candidates.is_empty() || max_tags == 0 {
            return Vec::new();
        }

        let temperature = clamp_temperature(temperature);
        let decay_window = Duration::days(self.config.decay_window_days);

        let mut scored: Vec<ScoredCandidate> = candidates
            .iter()
            .map(|tag| {
                let state = tag_states
                    .get(&tag.tag_id)
                    .map(|s| s.decayed(decay_window, self.config.decay_factor, now))
                    .unwrap_or_else(|| StyleTag::fresh(user_id, &tag.tag_id, tag.category));

                let sampled = sample_beta(state.alpha, state.beta, rng);
                let bias = brand_profile.bias_for(tag.category, &tag.label);
                let exploration = temperature * (1.0 - sampled);
                let final_score = sampled + bias + exploration;

                ScoredCandidate {
                    tag: tag.clone(),
                    alpha: state.alpha,
                    sampled,
                    bias,
                    final_score,
                }
            })
            .collect();

        scored.sort_by(compare_candidates);

        let selected = self.take_with_diversity(scored, max_tags);
        debug!(
            user_id,
            candidates = candidates.len(),
            selected = selected.len(),
            temperature,
            "bandit selection complete"
        );
        normalize_weights(selected)
    }

    /// Take the top candidates while holding each category to the cap, so a
    /// prompt is never dominated by one kind of modifier.
    fn take_with_diversity(
        &self,
        scored: Vec<ScoredCandidate>,
        max_tags: usize,
    ) -> Vec<ScoredCandidate> {
        let mut per_category: HashMap<TagCategory, usize> = HashMap::new();
        let mut selected = Vec::with_capacity(max_tags);

        for candidate in scored {
            if selected.len() >= max_tags {
                break;
            }
            let count = per_category.entry(candidate.tag.category).or_insert(0);
            if *count >= self.config.max_per_category {
                continue;
            }
            *count += 1;
            selected.push(candidate);
        }
        selected
    }
}

/// Descending by final score; ties break toward more historical evidence
/// (higher alpha), then lexical tag id for determinism.
fn compare_candidates(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.final_score
        .partial_cmp(&a.final_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.alpha.partial_cmp(&a.alpha).unwrap_or(Ordering::Equal))
        .then_with(|| a.tag.tag_id.cmp(&b.tag.tag_id))
}

/// Draw from Beta(alpha, beta). Parameters are >= 1 by invariant; should the
/// distribution still be unconstructible, fall back to a uniform draw.
fn sample_beta<R: Rng + ?Sized>(alpha: f64, beta: f64, rng: &mut R) -> f64 {
    Beta::new(alpha, beta)
        .map(|dist| dist.sample(rng))
        .unwrap_or_else(|_| rng.gen())
}

/// Emphasis weight of each selected modifier is its share of the selected
/// set's combined final score.
fn normalize_weights(selected: Vec<ScoredCandidate>) -> Vec<SelectedModifier> {
    let total: f64 = selected.iter().map(|c| c.final_score).sum();
    let count = selected.len();

    selected
        .into_iter()
        .map(|c| {
            let weight = if total > 0.0 {
                c.final_score / total
            } else {
                1.0 / count as f64
            };
            SelectedModifier {
                tag_id: c.tag.tag_id,
                label: c.tag.label,
                category: c.tag.category,
                weight,
                sampled_score: c.sampled,
                final_score: c.final_score,
                brand_biased: c.bias > 0.0,
            }
        })
        .collect()
}
