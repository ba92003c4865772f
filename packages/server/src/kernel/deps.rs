//! Server dependencies for the search pipeline (using traits for testability)
//!
//! External directories and the enrichment store are trait objects so domain
//! logic can be exercised with mock services.

use std::sync::Arc;

use super::traits::{BaseEnrichmentStore, BaseMedicaidDirectory, BaseNpiRegistry};

/// Dependencies shared by every provider search
#[derive(Clone)]
pub struct ServerDeps {
    /// State Medicaid provider directory
    pub medicaid: Arc<dyn BaseMedicaidDirectory>,
    /// Federal NPI registry
    pub npi_registry: Arc<dyn BaseNpiRegistry>,
    /// Local store of community ratings, reviews, and trust tags
    pub enrichment: Arc<dyn BaseEnrichmentStore>,
}

impl ServerDeps {
    pub fn new(
        medicaid: Arc<dyn BaseMedicaidDirectory>,
        npi_registry: Arc<dyn BaseNpiRegistry>,
        enrichment: Arc<dyn BaseEnrichmentStore>,
    ) -> Self {
        Self {
            medicaid,
            npi_registry,
            enrichment,
        }
    }
}
