use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::BrandProfile;

/// Read access to per-user brand profiles.
///
/// Profiles are rebuilt periodically by an upstream clustering job; this
/// engine only reads them. A missing profile is a normal cold-start
/// condition, not an error, and callers fall back to
/// [`BrandProfile::neutral`].
#[async_trait]
pub trait BrandProfileProvider: Send + Sync {
    /// Provider name, recorded when a fallback chain serves a request.
    fn name(&self) -> &str;

    /// Fetch the profile for a user, if one exists.
    async fn get_profile(&self, user_id: &str) -> DomainResult<Option<BrandProfile>>;

    /// Store a freshly extracted profile (used by the extraction job).
    async fn store_profile(&self, profile: &BrandProfile) -> DomainResult<()>;

    /// Signal the upstream job that a user's profile needs rebuilding.
    ///
    /// This only records the request; the rebuild itself happens elsewhere.
    async fn request_refresh(&self, user_id: &str) -> DomainResult<()>;
}
