//! SQLite implementation of the `BrandProfileProvider`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::errors::DomainResult;
use crate::domain::models::BrandProfile;
use crate::domain::ports::BrandProfileProvider;

#[derive(Clone)]
pub struct SqliteBrandProfileProvider {
    pool: SqlitePool,
}

impl SqliteBrandProfileProvider {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BrandProfileProvider for SqliteBrandProfileProvider {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn get_profile(&self, user_id: &str) -> DomainResult<Option<BrandProfile>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT profile FROM brand_profiles WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|(json,)| serde_json::from_str(&json).map_err(Into::into))
            .transpose()
    }

    async fn store_profile(&self, profile: &BrandProfile) -> DomainResult<()> {
        let json = serde_json::to_string(profile)?;
        sqlx::query(
            "INSERT INTO brand_profiles (user_id, profile, confidence, updated_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT (user_id) DO UPDATE SET
                profile = excluded.profile,
                confidence = excluded.confidence,
                updated_at = excluded.updated_at",
        )
        .bind(&profile.user_id)
        .bind(&json)
        .bind(profile.confidence)
        .bind(profile.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn request_refresh(&self, user_id: &str) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO profile_refresh_requests (user_id, requested_at)
             VALUES (?, ?)
             ON CONFLICT (user_id) DO UPDATE SET requested_at = excluded.requested_at",
        )
        .bind(user_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
