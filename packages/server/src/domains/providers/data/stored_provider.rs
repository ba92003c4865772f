use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// A practice location as stored in the community directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredLocation {
    pub address: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
}

/// Community-maintained provider record with ratings and trust tags
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredProvider {
    pub id: Uuid,
    pub npi: Option<String>,
    pub name: String,
    pub locations: Json<Vec<StoredLocation>>,

    // Stored aggregates, recomputed from live reviews when any exist
    pub rating: Option<f64>,
    pub review_count: i64,

    // Community trust signals
    pub mama_approved: bool,
    pub mama_approved_count: i64,
    pub identity_tags: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredProvider {
    /// Exact lookup by National Provider Identifier
    pub async fn find_by_npi(npi: &str, pool: &PgPool) -> Result<Option<Self>> {
        let provider = sqlx::query_as::<_, Self>("SELECT * FROM providers WHERE npi = $1")
            .bind(npi)
            .fetch_optional(pool)
            .await?;
        Ok(provider)
    }

    /// All providers sharing the exact name, oldest first, capped at `limit`
    pub async fn find_by_name(name: &str, limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        let providers = sqlx::query_as::<_, Self>(
            "SELECT * FROM providers WHERE name = $1 ORDER BY created_at ASC LIMIT $2",
        )
        .bind(name)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(providers)
    }
}
