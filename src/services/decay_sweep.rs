//! Scheduled decay sweep over the style tag store.
//!
//! The per-request path decay-adjusts belief state in memory; this sweep
//! persists the regression for rows that have gone untouched past the decay
//! window. An external scheduler invokes it off the request path.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::models::BanditConfig;
use crate::domain::ports::StyleTagRepository;

pub struct DecaySweep<R: StyleTagRepository> {
    repository: Arc<R>,
    config: BanditConfig,
}

impl<R: StyleTagRepository> DecaySweep<R> {
    pub fn new(repository: Arc<R>, config: BanditConfig) -> Self {
        Self { repository, config }
    }

    /// Run one sweep. Returns the number of rows decayed.
    pub async fn run(&self) -> DomainResult<u64> {
        let decayed = self
            .repository
            .apply_decay(
                Duration::days(self.config.decay_window_days),
                self.config.decay_factor,
                Utc::now(),
            )
            .await?;
        info!(decayed, "decay sweep complete");
        Ok(decayed)
    }
}
