//! In-memory adapters.
//!
//! Back the same port contracts as the SQLite adapters without a database;
//! used in unit tests and available for ephemeral embedding.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::clamp::floor_beta_param;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    BrandProfile, FeedbackApplication, FeedbackEvent, FeedbackOutcome, StyleTag,
};
use crate::domain::ports::{BrandProfileProvider, StyleTagRepository};

/// In-memory style tag store. The single mutex stands in for the per-row
/// atomicity the SQLite adapter gets from transactions.
#[derive(Default)]
pub struct InMemoryStyleTagRepository {
    state: Mutex<TagState>,
}

#[derive(Default)]
struct TagState {
    tags: HashMap<(String, String), StyleTag>,
    processed_events: HashSet<Uuid>,
}

impl InMemoryStyleTagRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a tag directly; test setup helper.
    pub fn seed(&self, tag: StyleTag) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state
            .tags
            .insert((tag.user_id.clone(), tag.tag_id.clone()), tag);
    }
}

#[async_trait]
impl StyleTagRepository for InMemoryStyleTagRepository {
    async fn get(&self, user_id: &str, tag_id: &str) -> DomainResult<Option<StyleTag>> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        Ok(state
            .tags
            .get(&(user_id.to_string(), tag_id.to_string()))
            .cloned())
    }

    async fn get_many(
        &self,
        user_id: &str,
        tag_ids: &[String],
    ) -> DomainResult<HashMap<String, StyleTag>> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        Ok(tag_ids
            .iter()
            .filter_map(|tag_id| {
                state
                    .tags
                    .get(&(user_id.to_string(), tag_id.clone()))
                    .map(|tag| (tag_id.clone(), tag.clone()))
            })
            .collect())
    }

    async fn record_feedback(
        &self,
        event: &FeedbackEvent,
    ) -> DomainResult<FeedbackApplication> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if !state.processed_events.insert(event.event_id) {
            return Ok(FeedbackApplication::Duplicate);
        }

        if event.outcome != FeedbackOutcome::Neutral {
            for applied in &event.applied_tags {
                let key = (event.user_id.clone(), applied.tag_id.clone());
                let tag = state.tags.entry(key).or_insert_with(|| {
                    StyleTag::fresh(&event.user_id, &applied.tag_id, applied.category)
                });
                match event.outcome {
                    FeedbackOutcome::Positive => tag.alpha += event.strength,
                    FeedbackOutcome::Negative => tag.beta += event.strength,
                    FeedbackOutcome::Neutral => {}
                }
                tag.updated_at = Utc::now();
            }
        }
        Ok(FeedbackApplication::Applied)
    }

    async fn apply_decay(
        &self,
        decay_window: Duration,
        decay_factor: f64,
        now: DateTime<Utc>,
    ) -> DomainResult<u64> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let mut decayed = 0;
        for tag in state.tags.values_mut() {
            if now - tag.updated_at > decay_window {
                tag.alpha = floor_beta_param(tag.alpha * decay_factor);
                tag.beta = floor_beta_param(tag.beta * decay_factor);
                tag.updated_at = now;
                decayed += 1;
            }
        }
        Ok(decayed)
    }

    async fn reset_tag(&self, user_id: &str, tag_id: &str) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        match state
            .tags
            .get_mut(&(user_id.to_string(), tag_id.to_string()))
        {
            Some(tag) => {
                tag.alpha = 1.0;
                tag.beta = 1.0;
                tag.updated_at = Utc::now();
                Ok(())
            }
            None => Err(DomainError::StyleTagNotFound {
                user_id: user_id.to_string(),
                tag_id: tag_id.to_string(),
            }),
        }
    }
}

/// In-memory brand profile store.
#[derive(Default)]
pub struct InMemoryBrandProfileProvider {
    profiles: Mutex<HashMap<String, BrandProfile>>,
    refresh_requests: Mutex<Vec<String>>,
}

impl InMemoryBrandProfileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Users for which a refresh has been signaled; test inspection helper.
    pub fn refresh_requests(&self) -> Vec<String> {
        self.refresh_requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl BrandProfileProvider for InMemoryBrandProfileProvider {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn get_profile(&self, user_id: &str) -> DomainResult<Option<BrandProfile>> {
        let profiles = self.profiles.lock().unwrap_or_else(|e| e.into_inner());
        Ok(profiles.get(user_id).cloned())
    }

    async fn store_profile(&self, profile: &BrandProfile) -> DomainResult<()> {
        let mut profiles = self.profiles.lock().unwrap_or_else(|e| e.into_inner());
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn request_refresh(&self, user_id: &str) -> DomainResult<()> {
        let mut requests = self
            .refresh_requests
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        requests.push(user_id.to_string());
        Ok(())
    }
}
