use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which external directory a record came from.
///
/// After dedup this reflects only the surviving copy, not every copy that
/// described the same provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderSource {
    Medicaid,
    Registry,
}

/// A provider practice location.
///
/// Adapters only retain locations carrying an address line or a city; the
/// first location drives identity keys and phone fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderLocation {
    pub address: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
}

/// Canonical provider record, normalized from either external directory.
///
/// Built per request, filtered by dedup, augmented by enrichment, then
/// serialized into the response. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub name: String,
    pub npi: Option<String>,
    pub specialty: Option<String>,
    pub specialties: Vec<String>,
    pub provider_types: Vec<String>,
    pub locations: Vec<ProviderLocation>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub source: ProviderSource,

    // Enrichment fields, defaulted until the enrichment service runs
    pub id: Option<Uuid>,
    pub rating: Option<f64>,
    pub review_count: i64,
    pub mama_approved: bool,
    pub mama_approved_count: i64,
    pub identity_tags: Vec<String>,
}

impl Provider {
    /// A provider with the given name and provenance and everything else
    /// empty. Adapters fill in the rest field by field.
    pub fn new(name: String, source: ProviderSource) -> Self {
        Self {
            name,
            npi: None,
            specialty: None,
            specialties: Vec::new(),
            provider_types: Vec::new(),
            locations: Vec::new(),
            phone: None,
            email: None,
            source,
            id: None,
            rating: None,
            review_count: 0,
            mama_approved: false,
            mama_approved_count: 0,
            identity_tags: Vec::new(),
        }
    }
}
