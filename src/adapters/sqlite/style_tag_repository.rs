//! SQLite implementation of the `StyleTagRepository`.
//!
//! Feedback application is a single transaction per event: the audit-log
//! insert doubles as the idempotency check, and alpha/beta move through
//! atomic in-place increments so concurrent events for the same tag cannot
//! lose updates.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::{QueryBuilder, SqlitePool};

use crate::adapters::sqlite::parse_datetime;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    FeedbackApplication, FeedbackEvent, FeedbackOutcome, StyleTag, TagCategory,
};
use crate::domain::ports::StyleTagRepository;

#[derive(Clone)]
pub struct SqliteStyleTagRepository {
    pool: SqlitePool,
}

impl SqliteStyleTagRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct StyleTagRow {
    user_id: String,
    tag_id: String,
    category: String,
    alpha: f64,
    beta: f64,
    updated_at: String,
}

impl TryFrom<StyleTagRow> for StyleTag {
    type Error = DomainError;

    fn try_from(row: StyleTagRow) -> DomainResult<Self> {
        Ok(StyleTag {
            user_id: row.user_id,
            tag_id: row.tag_id,
            category: TagCategory::from_str(&row.category).unwrap_or(TagCategory::Other),
            alpha: row.alpha,
            beta: row.beta,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}

const SELECT_COLUMNS: &str = "user_id, tag_id, category, alpha, beta, updated_at";

#[async_trait]
impl StyleTagRepository for SqliteStyleTagRepository {
    async fn get(&self, user_id: &str, tag_id: &str) -> DomainResult<Option<StyleTag>> {
        let row: Option<StyleTagRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM style_tags WHERE user_id = ? AND tag_id = ?"
        ))
        .bind(user_id)
        .bind(tag_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(StyleTag::try_from).transpose()
    }

    async fn get_many(
        &self,
        user_id: &str,
        tag_ids: &[String],
    ) -> DomainResult<HashMap<String, StyleTag>> {
        if tag_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut builder = QueryBuilder::new(format!(
            "SELECT {SELECT_COLUMNS} FROM style_tags WHERE user_id = "
        ));
        builder.push_bind(user_id);
        builder.push(" AND tag_id IN (");
        let mut separated = builder.separated(", ");
        for tag_id in tag_ids {
            separated.push_bind(tag_id);
        }
        builder.push(")");

        let rows: Vec<StyleTagRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter()
            .map(|row| StyleTag::try_from(row).map(|tag| (tag.tag_id.clone(), tag)))
            .collect()
    }

    async fn record_feedback(
        &self,
        event: &FeedbackEvent,
    ) -> DomainResult<FeedbackApplication> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now().to_rfc3339();
        let applied_tags_json = serde_json::to_string(&event.applied_tags)?;

        // The audit insert is the idempotency gate: a duplicate event id
        // conflicts and leaves every belief row untouched.
        let inserted = sqlx::query(
            "INSERT INTO feedback_events
                (event_id, user_id, outcome, strength, applied_tags, observed_at, recorded_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (event_id) DO NOTHING",
        )
        .bind(event.event_id.to_string())
        .bind(&event.user_id)
        .bind(event.outcome.as_str())
        .bind(event.strength)
        .bind(&applied_tags_json)
        .bind(event.observed_at.to_rfc3339())
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(FeedbackApplication::Duplicate);
        }

        if event.outcome != FeedbackOutcome::Neutral {
            let increment_sql = match event.outcome {
                FeedbackOutcome::Positive => {
                    "UPDATE style_tags SET alpha = alpha + ?, updated_at = ?
                     WHERE user_id = ? AND tag_id = ?"
                }
                _ => {
                    "UPDATE style_tags SET beta = beta + ?, updated_at = ?
                     WHERE user_id = ? AND tag_id = ?"
                }
            };

            for tag in &event.applied_tags {
                sqlx::query(
                    "INSERT INTO style_tags (user_id, tag_id, category, alpha, beta, updated_at)
                     VALUES (?, ?, ?, 1.0, 1.0, ?)
                     ON CONFLICT (user_id, tag_id) DO NOTHING",
                )
                .bind(&event.user_id)
                .bind(&tag.tag_id)
                .bind(tag.category.as_str())
                .bind(&now)
                .execute(&mut *tx)
                .await?;

                sqlx::query(increment_sql)
                    .bind(event.strength)
                    .bind(&now)
                    .bind(&event.user_id)
                    .bind(&tag.tag_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(FeedbackApplication::Applied)
    }

    async fn apply_decay(
        &self,
        decay_window: Duration,
        decay_factor: f64,
        now: DateTime<Utc>,
    ) -> DomainResult<u64> {
        let cutoff = (now - decay_window).to_rfc3339();
        // Touching updated_at makes the decay one-shot per window: the row
        // reads as fresh until it goes stale again.
        let result = sqlx::query(
            "UPDATE style_tags
             SET alpha = MAX(1.0, alpha * ?),
                 beta = MAX(1.0, beta * ?),
                 updated_at = ?
             WHERE updated_at < ?",
        )
        .bind(decay_factor)
        .bind(decay_factor)
        .bind(now.to_rfc3339())
        .bind(&cutoff)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn reset_tag(&self, user_id: &str, tag_id: &str) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE style_tags SET alpha = 1.0, beta = 1.0, updated_at = ?
             WHERE user_id = ? AND tag_id = ?",
        )
        .bind(Utc::now().to_rfc3339())
        .bind(user_id)
        .bind(tag_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::StyleTagNotFound {
                user_id: user_id.to_string(),
                tag_id: tag_id.to_string(),
            });
        }
        Ok(())
    }
}
