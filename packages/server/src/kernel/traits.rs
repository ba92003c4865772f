// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Normalization and matching live in domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseMedicaidDirectory)

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::medicaid_client::{FhirBundle, MedicaidQuery};
use super::npi_client::{NpiQuery, NpiResponse};
use crate::domains::providers::data::{Review, StoredProvider};

// =============================================================================
// Medicaid Directory Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseMedicaidDirectory: Send + Sync {
    /// Run a bundle search against the state Medicaid directory
    async fn search(&self, query: &MedicaidQuery) -> Result<FhirBundle>;
}

// =============================================================================
// NPI Registry Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseNpiRegistry: Send + Sync {
    /// Search the federal NPI registry by taxonomy code and location
    async fn search(&self, query: &NpiQuery) -> Result<NpiResponse>;
}

// =============================================================================
// Enrichment Store Trait (Infrastructure - community data lookups)
// =============================================================================

#[async_trait]
pub trait BaseEnrichmentStore: Send + Sync {
    /// Exact lookup by National Provider Identifier
    async fn find_by_npi(&self, npi: &str) -> Result<Option<StoredProvider>>;

    /// All stored providers sharing the exact name, capped at `limit`
    async fn find_by_name(&self, name: &str, limit: i64) -> Result<Vec<StoredProvider>>;

    /// Community reviews for a stored provider, newest first, capped at `limit`
    async fn reviews_for_provider(&self, provider_id: Uuid, limit: i64) -> Result<Vec<Review>>;
}
