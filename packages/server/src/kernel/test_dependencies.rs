// TestDependencies - mock implementations for testing
//
// Provides mock directories and an in-memory enrichment store that can be
// injected into the search pipeline through ServerDeps.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::deps::ServerDeps;
use super::medicaid_client::{FhirBundle, MedicaidQuery};
use super::npi_client::{NpiQuery, NpiResponse};
use super::traits::{BaseEnrichmentStore, BaseMedicaidDirectory, BaseNpiRegistry};
use crate::domains::providers::data::{Review, StoredProvider};

// =============================================================================
// Mock Medicaid Directory
// =============================================================================

#[derive(Default)]
pub struct MockMedicaidDirectory {
    responses: Mutex<Vec<FhirBundle>>,
    calls: Mutex<Vec<MedicaidQuery>>,
    fail: Mutex<bool>,
}

impl MockMedicaidDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a bundle to be returned by the next search
    pub fn with_bundle(self, bundle: FhirBundle) -> Self {
        self.responses.lock().unwrap().push(bundle);
        self
    }

    /// Make every search fail, simulating a directory outage
    pub fn with_failure(self) -> Self {
        *self.fail.lock().unwrap() = true;
        self
    }

    /// All queries the directory was searched with
    pub fn calls(&self) -> Vec<MedicaidQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseMedicaidDirectory for MockMedicaidDirectory {
    async fn search(&self, query: &MedicaidQuery) -> Result<FhirBundle> {
        self.calls.lock().unwrap().push(query.clone());

        if *self.fail.lock().unwrap() {
            anyhow::bail!("simulated Medicaid directory outage");
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(FhirBundle::default())
        } else {
            Ok(responses.remove(0))
        }
    }
}

// =============================================================================
// Mock NPI Registry
// =============================================================================

#[derive(Default)]
pub struct MockNpiRegistry {
    responses: Mutex<Vec<NpiResponse>>,
    calls: Mutex<Vec<NpiQuery>>,
    fail: Mutex<bool>,
}

impl MockNpiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to be returned by the next search
    pub fn with_response(self, response: NpiResponse) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Make every search fail, simulating a registry outage
    pub fn with_failure(self) -> Self {
        *self.fail.lock().unwrap() = true;
        self
    }

    /// All queries the registry was searched with
    pub fn calls(&self) -> Vec<NpiQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseNpiRegistry for MockNpiRegistry {
    async fn search(&self, query: &NpiQuery) -> Result<NpiResponse> {
        self.calls.lock().unwrap().push(query.clone());

        if *self.fail.lock().unwrap() {
            anyhow::bail!("simulated NPI registry outage");
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(NpiResponse::default())
        } else {
            Ok(responses.remove(0))
        }
    }
}

// =============================================================================
// In-memory Enrichment Store
// =============================================================================

#[derive(Default)]
pub struct InMemoryEnrichmentStore {
    providers: Mutex<Vec<StoredProvider>>,
    reviews: Mutex<HashMap<Uuid, Vec<Review>>>,
    fail: Mutex<bool>,
}

impl InMemoryEnrichmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(self, provider: StoredProvider) -> Self {
        self.providers.lock().unwrap().push(provider);
        self
    }

    /// Attach reviews with the given ratings to a stored provider
    pub fn with_reviews(self, provider_id: Uuid, ratings: &[f64]) -> Self {
        let reviews: Vec<Review> = ratings
            .iter()
            .map(|rating| Review {
                id: Uuid::new_v4(),
                provider_id,
                rating: *rating,
                comment: None,
                created_at: Utc::now(),
            })
            .collect();
        self.reviews.lock().unwrap().insert(provider_id, reviews);
        self
    }

    /// Make every lookup fail, simulating a store outage
    pub fn with_failure(self) -> Self {
        *self.fail.lock().unwrap() = true;
        self
    }

    fn check_failure(&self) -> Result<()> {
        if *self.fail.lock().unwrap() {
            anyhow::bail!("simulated enrichment store outage");
        }
        Ok(())
    }
}

#[async_trait]
impl BaseEnrichmentStore for InMemoryEnrichmentStore {
    async fn find_by_npi(&self, npi: &str) -> Result<Option<StoredProvider>> {
        self.check_failure()?;
        Ok(self
            .providers
            .lock()
            .unwrap()
            .iter()
            .find(|provider| provider.npi.as_deref() == Some(npi))
            .cloned())
    }

    async fn find_by_name(&self, name: &str, limit: i64) -> Result<Vec<StoredProvider>> {
        self.check_failure()?;
        Ok(self
            .providers
            .lock()
            .unwrap()
            .iter()
            .filter(|provider| provider.name == name)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn reviews_for_provider(&self, provider_id: Uuid, limit: i64) -> Result<Vec<Review>> {
        self.check_failure()?;
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .get(&provider_id)
            .map(|reviews| reviews.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundles the mock services and hands out a ServerDeps wired to them
pub struct TestDependencies {
    pub medicaid: Arc<MockMedicaidDirectory>,
    pub npi_registry: Arc<MockNpiRegistry>,
    pub enrichment: Arc<InMemoryEnrichmentStore>,
}

impl TestDependencies {
    pub fn new(
        medicaid: MockMedicaidDirectory,
        npi_registry: MockNpiRegistry,
        enrichment: InMemoryEnrichmentStore,
    ) -> Self {
        Self {
            medicaid: Arc::new(medicaid),
            npi_registry: Arc::new(npi_registry),
            enrichment: Arc::new(enrichment),
        }
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.medicaid.clone(),
            self.npi_registry.clone(),
            self.enrichment.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new(
            MockMedicaidDirectory::new(),
            MockNpiRegistry::new(),
            InMemoryEnrichmentStore::new(),
        )
    }
}

/// A stored provider with empty enrichment data, for tests to build on
pub fn stored_provider(name: &str, npi: Option<&str>) -> StoredProvider {
    StoredProvider {
        id: Uuid::new_v4(),
        npi: npi.map(String::from),
        name: name.to_string(),
        locations: Json(Vec::new()),
        rating: None,
        review_count: 0,
        mama_approved: false,
        mama_approved_count: 0,
        identity_tags: Vec::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
