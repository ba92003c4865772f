//! Local enrichment store: community-maintained provider records and their
//! reviews, backed by Postgres.

mod review;
mod stored_provider;

pub use review::Review;
pub use stored_provider::{StoredLocation, StoredProvider};

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::kernel::traits::BaseEnrichmentStore;

/// Postgres-backed enrichment store
pub struct PgEnrichmentStore {
    pool: PgPool,
}

impl PgEnrichmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseEnrichmentStore for PgEnrichmentStore {
    async fn find_by_npi(&self, npi: &str) -> Result<Option<StoredProvider>> {
        StoredProvider::find_by_npi(npi, &self.pool).await
    }

    async fn find_by_name(&self, name: &str, limit: i64) -> Result<Vec<StoredProvider>> {
        StoredProvider::find_by_name(name, limit, &self.pool).await
    }

    async fn reviews_for_provider(&self, provider_id: Uuid, limit: i64) -> Result<Vec<Review>> {
        Review::find_for_provider(provider_id, limit, &self.pool).await
    }
}
