//! Orchestrates the source adapters.
//!
//! Medicaid is always searched first; the federal registry runs only when
//! the caller asked for NPI results or Medicaid came back empty. Call order
//! is significant: first-seen-wins dedup gives Medicaid records priority.

use tracing::{debug, info};

use super::adapters::{search_medicaid, search_registry};
use super::models::{Provider, ProviderSearchRequest};
use super::taxonomy::resolve_classification;
use crate::kernel::ServerDeps;

/// Fallback behavior, passed in explicitly rather than read from the
/// environment.
#[derive(Debug, Clone)]
pub struct SearchPolicy {
    /// Search the federal registry when the Medicaid directory returns
    /// nothing, even if the caller did not ask for NPI results.
    pub registry_fallback_on_empty: bool,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            registry_fallback_on_empty: true,
        }
    }
}

/// Run the adapters and concatenate their output in call order.
///
/// Adapter calls are sequential by design: whether the registry runs at all
/// depends on the Medicaid outcome.
pub async fn aggregate_providers(
    request: &ProviderSearchRequest,
    policy: &SearchPolicy,
    deps: &ServerDeps,
) -> Vec<Provider> {
    let mut providers = search_medicaid(request, deps.medicaid.as_ref()).await;
    info!(count = providers.len(), "Medicaid directory search complete");

    let registry_wanted = request.include_npi
        || (providers.is_empty() && policy.registry_fallback_on_empty);
    if !registry_wanted {
        return providers;
    }

    match resolve_classification(request.specialty.as_deref(), &request.provider_type_ids) {
        Some(taxonomy_code) => {
            let registry_providers =
                search_registry(request, taxonomy_code, deps.npi_registry.as_ref()).await;
            info!(
                count = registry_providers.len(),
                taxonomy_code, "NPI registry search complete"
            );
            providers.extend(registry_providers);
        }
        None => {
            debug!("No classification code resolved, skipping NPI registry");
        }
    }

    providers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{
        InMemoryEnrichmentStore, MockMedicaidDirectory, MockNpiRegistry, TestDependencies,
    };
    use crate::kernel::{FhirBundle, NpiResponse};
    use serde_json::json;

    fn request(specialty: Option<&str>, include_npi: bool) -> ProviderSearchRequest {
        ProviderSearchRequest {
            zip: "43215".to_string(),
            city: "Columbus".to_string(),
            health_plan: "caresource".to_string(),
            provider_type_ids: vec![],
            radius: 25,
            specialty: specialty.map(String::from),
            include_npi,
            accepts_pregnant_women: None,
            accepts_newborns: None,
            telehealth: None,
        }
    }

    fn medicaid_bundle(names: &[&str]) -> FhirBundle {
        let entries: Vec<_> = names
            .iter()
            .map(|name| json!({ "resource": { "name": [{ "given": [name], "family": "Example" }] } }))
            .collect();
        serde_json::from_value(json!({ "entry": entries })).unwrap()
    }

    fn registry_response(organizations: &[&str]) -> NpiResponse {
        let results: Vec<_> = organizations
            .iter()
            .map(|name| json!({ "basic": { "organization_name": name } }))
            .collect();
        serde_json::from_value(json!({ "results": results })).unwrap()
    }

    #[tokio::test]
    async fn registry_is_skipped_when_medicaid_has_results() {
        let deps = TestDependencies::new(
            MockMedicaidDirectory::new().with_bundle(medicaid_bundle(&["Amy"])),
            MockNpiRegistry::new(),
            InMemoryEnrichmentStore::new(),
        );

        let providers = aggregate_providers(
            &request(Some("OB-GYN"), false),
            &SearchPolicy::default(),
            &deps.server_deps(),
        )
        .await;

        assert_eq!(providers.len(), 1);
        assert_eq!(deps.npi_registry.call_count(), 0);
    }

    #[tokio::test]
    async fn registry_runs_as_fallback_when_medicaid_is_empty() {
        let deps = TestDependencies::new(
            MockMedicaidDirectory::new(),
            MockNpiRegistry::new().with_response(registry_response(&["Eastside Birth Center"])),
            InMemoryEnrichmentStore::new(),
        );

        let providers = aggregate_providers(
            &request(Some("OB-GYN"), false),
            &SearchPolicy::default(),
            &deps.server_deps(),
        )
        .await;

        assert_eq!(deps.medicaid.call_count(), 1);
        assert_eq!(deps.npi_registry.call_count(), 1);
        assert_eq!(providers[0].name, "Eastside Birth Center");
    }

    #[tokio::test]
    async fn include_npi_appends_registry_results_after_medicaid() {
        let deps = TestDependencies::new(
            MockMedicaidDirectory::new().with_bundle(medicaid_bundle(&["Amy"])),
            MockNpiRegistry::new().with_response(registry_response(&["Eastside Birth Center"])),
            InMemoryEnrichmentStore::new(),
        );

        let providers = aggregate_providers(
            &request(Some("OB-GYN"), true),
            &SearchPolicy::default(),
            &deps.server_deps(),
        )
        .await;

        let names: Vec<&str> = providers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Amy Example", "Eastside Birth Center"]);
    }

    #[tokio::test]
    async fn registry_is_skipped_without_a_classification_code() {
        let deps = TestDependencies::new(
            MockMedicaidDirectory::new(),
            MockNpiRegistry::new(),
            InMemoryEnrichmentStore::new(),
        );

        let providers = aggregate_providers(
            &request(Some("underwater therapy"), true),
            &SearchPolicy::default(),
            &deps.server_deps(),
        )
        .await;

        assert!(providers.is_empty());
        assert_eq!(deps.npi_registry.call_count(), 0);
    }

    #[tokio::test]
    async fn fallback_can_be_disabled_by_policy() {
        let deps = TestDependencies::new(
            MockMedicaidDirectory::new(),
            MockNpiRegistry::new(),
            InMemoryEnrichmentStore::new(),
        );
        let policy = SearchPolicy {
            registry_fallback_on_empty: false,
        };

        let providers =
            aggregate_providers(&request(Some("OB-GYN"), false), &policy, &deps.server_deps())
                .await;

        assert!(providers.is_empty());
        assert_eq!(deps.npi_registry.call_count(), 0);
    }

    #[tokio::test]
    async fn medicaid_outage_still_falls_back_to_registry() {
        let deps = TestDependencies::new(
            MockMedicaidDirectory::new().with_failure(),
            MockNpiRegistry::new().with_response(registry_response(&["Eastside Birth Center"])),
            InMemoryEnrichmentStore::new(),
        );

        let providers = aggregate_providers(
            &request(Some("OB-GYN"), false),
            &SearchPolicy::default(),
            &deps.server_deps(),
        )
        .await;

        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].name, "Eastside Birth Center");
    }
}
