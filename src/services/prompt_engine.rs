//! Engine facade: weighted prompt generation, feedback recording, and the
//! explain surface.
//!
//! One call = one unit of work. The only suspension points are the
//! repository and provider fetches, which run under a short timeout with
//! cold-start fallbacks; the scoring math itself is synchronous.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    BrandProfile, DesignCommand, EngineConfig, FeedbackApplication, FeedbackEvent, GarmentFacts,
    GenerationExplanation, ModifierCatalog, PromptAssembly, StyleTag,
};
use crate::domain::ports::{BrandProfileProvider, StyleTagRepository};
use crate::services::{
    BanditSelector, ExplainCache, FeedbackIngestor, PromptAssembler, SpecificityAnalyzer,
};

/// The adaptive prompt synthesis engine.
///
/// Stateless apart from the injected stores and the bounded explain cache;
/// safe to share across request tasks behind an `Arc`.
pub struct PromptEngine<R, P>
where
    R: StyleTagRepository,
    P: BrandProfileProvider,
{
    tag_repository: Arc<R>,
    profile_provider: Arc<P>,
    analyzer: SpecificityAnalyzer,
    selector: BanditSelector,
    assembler: PromptAssembler,
    ingestor: FeedbackIngestor<R>,
    catalog: ModifierCatalog,
    explain_cache: ExplainCache,
    config: EngineConfig,
}

impl<R, P> PromptEngine<R, P>
where
    R: StyleTagRepository,
    P: BrandProfileProvider,
{
    pub fn new(config: EngineConfig, tag_repository: Arc<R>, profile_provider: Arc<P>) -> Self {
        Self {
            analyzer: SpecificityAnalyzer::new(config.specificity.clone()),
            selector: BanditSelector::new(config.bandit.clone()),
            assembler: PromptAssembler::new(config.assembler.clone()),
            ingestor: FeedbackIngestor::new(tag_repository.clone(), config.feedback.clone()),
            explain_cache: ExplainCache::new(
                StdDuration::from_secs(config.explain_ttl_secs),
                config.explain_capacity,
            ),
            catalog: ModifierCatalog::default(),
            tag_repository,
            profile_provider,
            config,
        }
    }

    /// Replace the default modifier catalog.
    pub fn with_catalog(mut self, catalog: ModifierCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Generate a weighted prompt pair for one design request.
    ///
    /// Missing personalization (no profile, no tag history, fetch timeout)
    /// degrades to neutral defaults and still produces a valid prompt. A
    /// hard style-tag store failure is the one condition surfaced to the
    /// caller, since sampling against silently stale state would corrupt the
    /// bandit's guarantees.
    pub async fn generate_weighted_prompt(
        &self,
        user_id: &str,
        command: &DesignCommand,
        facts: &GarmentFacts,
        max_tags: Option<usize>,
    ) -> DomainResult<PromptAssembly> {
        let specificity = self.analyzer.analyze(command);
        let profile = self.fetch_profile(user_id).await;
        self.signal_refresh_if_stale(&profile).await;

        let candidates = self.catalog.candidates_for(&command.attributes);
        let tag_states = self.fetch_tag_states(user_id, &candidates).await?;

        let mut rng = match self.config.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let max_tags = max_tags.unwrap_or(self.config.bandit.default_max_tags);
        let modifiers = self.selector.select(
            user_id,
            &candidates,
            &tag_states,
            &profile,
            specificity.temperature,
            max_tags,
            Utc::now(),
            &mut rng,
        );

        let assembly =
            self.assembler
                .assemble(user_id, facts, &modifiers, &profile, &specificity);

        self.explain_cache.insert(GenerationExplanation {
            assembly_id: assembly.assembly_id,
            user_id: user_id.to_string(),
            specificity,
            applied_tags: assembly.applied_tags.clone(),
            brand_consistency_estimate: assembly.metadata.brand_consistency_estimate,
        });

        info!(
            user_id,
            assembly_id = %assembly.assembly_id,
            modifiers = assembly.applied_tags.len(),
            mode = assembly.metadata.mode.as_str(),
            "prompt assembled"
        );
        Ok(assembly)
    }

    /// Record a feedback event against the style tag store.
    ///
    /// Persistence failures surface to the caller, which decides whether to
    /// retry; generation is unaffected since feedback is written after it.
    pub async fn record_feedback(
        &self,
        event: &FeedbackEvent,
    ) -> DomainResult<FeedbackApplication> {
        self.ingestor.ingest(event).await
    }

    /// Diagnostic surface: factor breakdown and per-tag sampled scores for
    /// a recent generation. Entries age out of the bounded cache.
    pub fn explain_generation(&self, assembly_id: Uuid) -> Option<GenerationExplanation> {
        self.explain_cache.get(assembly_id)
    }

    /// Profile fetch with timeout; every failure path lands on the neutral
    /// profile so generation proceeds unpersonalized.
    async fn fetch_profile(&self, user_id: &str) -> BrandProfile {
        let deadline = StdDuration::from_millis(self.config.fetch_timeout_ms);
        match timeout(deadline, self.profile_provider.get_profile(user_id)).await {
            Ok(Ok(Some(profile))) => profile,
            Ok(Ok(None)) => {
                info!(user_id, "no brand profile, using neutral cold-start profile");
                BrandProfile::neutral(user_id)
            }
            Ok(Err(err)) => {
                warn!(user_id, error = %err, "brand profile fetch failed, using neutral");
                BrandProfile::neutral(user_id)
            }
            Err(_) => {
                warn!(user_id, "brand profile fetch timed out, using neutral");
                BrandProfile::neutral(user_id)
            }
        }
    }

    /// Tag state fetch with timeout. Timeout falls back to fresh tags; a
    /// store error propagates.
    async fn fetch_tag_states(
        &self,
        user_id: &str,
        candidates: &[crate::domain::models::CatalogTag],
    ) -> DomainResult<HashMap<String, StyleTag>> {
        let tag_ids: Vec<String> = candidates.iter().map(|t| t.tag_id.clone()).collect();
        let deadline = StdDuration::from_millis(self.config.fetch_timeout_ms);
        match timeout(deadline, self.tag_repository.get_many(user_id, &tag_ids)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(user_id, "style tag fetch timed out, sampling from fresh priors");
                Ok(HashMap::new())
            }
        }
    }

    /// Fire a refresh signal when the profile has outlived its horizon.
    /// Best-effort: a failed signal is logged and ignored.
    async fn signal_refresh_if_stale(&self, profile: &BrandProfile) {
        if !profile.has_signal() {
            return;
        }
        let horizon = Duration::days(self.config.profile_staleness_days);
        if profile.is_stale(horizon, Utc::now()) {
            debug!(user_id = %profile.user_id, "profile stale, requesting refresh");
            if let Err(err) = self.profile_provider.request_refresh(&profile.user_id).await {
                warn!(user_id = %profile.user_id, error = %err, "refresh signal failed");
            }
        }
    }
}
