//! Medicaid directory adapter: FHIR-style bundle -> Provider records.

use tracing::{debug, warn};

use crate::domains::providers::models::{Provider, ProviderLocation, ProviderSearchRequest, ProviderSource};
use crate::kernel::medicaid_client::{FhirBundle, FhirEntry, FhirResource, MedicaidQuery};
use crate::kernel::traits::BaseMedicaidDirectory;

impl From<&ProviderSearchRequest> for MedicaidQuery {
    fn from(request: &ProviderSearchRequest) -> Self {
        Self {
            zip: request.zip.clone(),
            city: request.city.clone(),
            health_plan: request.health_plan.clone(),
            provider_type_ids: request.provider_type_ids.clone(),
            radius: request.radius,
            accepts_pregnant_women: request.accepts_pregnant_women,
            accepts_newborns: request.accepts_newborns,
            telehealth: request.telehealth,
        }
    }
}

/// Search the Medicaid directory and normalize the bundle.
///
/// A failed call yields an empty result set so the aggregator can fall back
/// to the federal registry.
pub async fn search_medicaid(
    request: &ProviderSearchRequest,
    directory: &dyn BaseMedicaidDirectory,
) -> Vec<Provider> {
    let query = MedicaidQuery::from(request);

    let bundle = match directory.search(&query).await {
        Ok(bundle) => bundle,
        Err(error) => {
            warn!(error = %error, "Medicaid directory search failed, returning no results");
            return Vec::new();
        }
    };

    parse_bundle(&bundle, request.specialty.as_deref())
}

/// Convert every parseable bundle entry, applying the caller's specialty
/// filter. An entry that fails to parse is skipped, never fatal to the batch.
pub fn parse_bundle(bundle: &FhirBundle, specialty_filter: Option<&str>) -> Vec<Provider> {
    bundle
        .entry
        .iter()
        .filter_map(|value| match serde_json::from_value::<FhirEntry>(value.clone()) {
            Ok(entry) => entry.resource,
            Err(error) => {
                warn!(error = %error, "Skipping malformed Medicaid bundle entry");
                None
            }
        })
        .filter_map(|resource| provider_from_resource(&resource))
        .filter(|provider| passes_specialty_filter(provider, specialty_filter))
        .collect()
}

/// Normalize one bundle resource; None drops the record.
fn provider_from_resource(resource: &FhirResource) -> Option<Provider> {
    let Some(name) = resource_name(resource) else {
        debug!("Skipping Medicaid resource without a derivable name");
        return None;
    };

    let mut provider = Provider::new(name, ProviderSource::Medicaid);

    for address in &resource.address {
        let line = address.line.as_ref().filter(|line| !line.is_empty());
        let has_city = address.city.as_deref().is_some_and(|city| !city.is_empty());
        if line.is_none() && !has_city {
            continue;
        }
        provider.locations.push(ProviderLocation {
            address: line.map(|line| line.joined()),
            address2: None,
            city: address.city.clone(),
            state: address.state.clone(),
            zip: address.postal_code.clone(),
            phone: None,
        });
    }

    provider.provider_types = resource
        .provider_type
        .iter()
        .flat_map(|concept| concept.coding.iter())
        .filter_map(|coding| coding.code.clone())
        .collect();

    provider.specialties = resource
        .specialty
        .iter()
        .filter_map(|specialty| specialty.text.clone())
        .collect();
    provider.specialty = provider.specialties.first().cloned();

    provider.phone = telecom_value(resource, "phone");
    provider.email = telecom_value(resource, "email");

    provider.npi = resource
        .identifier
        .iter()
        .find(|identifier| {
            identifier
                .system
                .as_deref()
                .is_some_and(|system| system.contains("npi"))
        })
        .and_then(|identifier| identifier.value.clone());

    Some(provider)
}

/// Join given+family parts per name entry, entries joined with ", ";
/// fall back to the organization name.
fn resource_name(resource: &FhirResource) -> Option<String> {
    let personal: Vec<String> = resource
        .name
        .iter()
        .filter_map(|name| {
            let mut parts: Vec<&str> = name.given.iter().map(String::as_str).collect();
            if let Some(family) = &name.family {
                parts.push(family);
            }
            let joined = parts
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            (!joined.is_empty()).then_some(joined)
        })
        .collect();

    if !personal.is_empty() {
        return Some(personal.join(", "));
    }

    resource
        .organization_name
        .clone()
        .filter(|name| !name.is_empty())
}

fn telecom_value(resource: &FhirResource, system: &str) -> Option<String> {
    resource
        .telecom
        .iter()
        .find(|telecom| telecom.system.as_deref() == Some(system))
        .and_then(|telecom| telecom.value.clone())
}

/// Permissive filter: records with no specialty at all pass through.
fn passes_specialty_filter(provider: &Provider, filter: Option<&str>) -> bool {
    let Some(filter) = filter.filter(|f| !f.is_empty()) else {
        return true;
    };
    match &provider.specialty {
        Some(specialty) => specialty.to_lowercase().contains(&filter.to_lowercase()),
        None => true,
    }
}
