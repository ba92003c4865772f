use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A community review for a stored provider
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub rating: f64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Reviews for a provider, newest first, capped at `limit`
    pub async fn find_for_provider(
        provider_id: Uuid,
        limit: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let reviews = sqlx::query_as::<_, Self>(
            "SELECT * FROM reviews WHERE provider_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(provider_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(reviews)
    }
}
