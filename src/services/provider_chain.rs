//! Ordered fallback chain over brand profile providers.
//!
//! First provider to return a profile wins; the serving provider is
//! recorded in the logs. A provider error moves on to the next provider
//! rather than failing the chain, because a degraded profile read must not
//! block generation.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::BrandProfile;
use crate::domain::ports::BrandProfileProvider;

pub struct ProviderChain {
    providers: Vec<Arc<dyn BrandProfileProvider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn BrandProfileProvider>>) -> Self {
        Self { providers }
    }
}

#[async_trait]
impl BrandProfileProvider for ProviderChain {
    fn name(&self) -> &str {
        "provider-chain"
    }

    async fn get_profile(&self, user_id: &str) -> DomainResult<Option<BrandProfile>> {
        for provider in &self.providers {
            match provider.get_profile(user_id).await {
                Ok(Some(profile)) => {
                    debug!(user_id, provider = provider.name(), "profile served");
                    return Ok(Some(profile));
                }
                Ok(None) => continue,
                Err(err) => {
                    warn!(
                        user_id,
                        provider = provider.name(),
                        error = %err,
                        "provider failed, trying next"
                    );
                }
            }
        }
        Ok(None)
    }

    async fn store_profile(&self, profile: &BrandProfile) -> DomainResult<()> {
        // Writes go to the primary provider only.
        match self.providers.first() {
            Some(primary) => primary.store_profile(profile).await,
            None => Ok(()),
        }
    }

    async fn request_refresh(&self, user_id: &str) -> DomainResult<()> {
        match self.providers.first() {
            Some(primary) => primary.request_refresh(user_id).await,
            None => Ok(()),
        }
    }
}
