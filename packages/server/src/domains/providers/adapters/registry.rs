//! Federal NPI registry adapter: NPPES results -> Provider records.

use tracing::{debug, warn};

use crate::domains::providers::models::{Provider, ProviderLocation, ProviderSearchRequest, ProviderSource};
use crate::kernel::npi_client::{NpiQuery, NpiResponse, NpiResult};
use crate::kernel::traits::BaseNpiRegistry;

/// Search the NPI registry for the resolved taxonomy code.
///
/// The request's radius is not forwarded; NPPES has no radius parameter and
/// filters by postal code and city instead. Failures degrade to empty, same
/// as the Medicaid adapter.
pub async fn search_registry(
    request: &ProviderSearchRequest,
    taxonomy_code: &str,
    registry: &dyn BaseNpiRegistry,
) -> Vec<Provider> {
    let query = NpiQuery {
        taxonomy_code: taxonomy_code.to_string(),
        postal_code: Some(request.zip.clone()),
        city: Some(request.city.clone()),
    };

    let response = match registry.search(&query).await {
        Ok(response) => response,
        Err(error) => {
            warn!(error = %error, "NPI registry search failed, returning no results");
            return Vec::new();
        }
    };

    parse_results(&response)
}

/// Convert every parseable registry result. A result that fails to parse is
/// skipped, never fatal to the batch.
pub fn parse_results(response: &NpiResponse) -> Vec<Provider> {
    response
        .results
        .iter()
        .filter_map(|value| match serde_json::from_value::<NpiResult>(value.clone()) {
            Ok(result) => provider_from_result(&result),
            Err(error) => {
                warn!(error = %error, "Skipping malformed NPI registry result");
                None
            }
        })
        .collect()
}

/// Normalize one registry result; None drops the record.
fn provider_from_result(result: &NpiResult) -> Option<Provider> {
    let Some(name) = result_name(result) else {
        debug!("Skipping registry result without a derivable name");
        return None;
    };

    let mut provider = Provider::new(name, ProviderSource::Registry);

    provider.npi = result.number.as_ref().map(|number| number.as_string());

    for address in &result.addresses {
        let has_line = address
            .address_1
            .as_deref()
            .is_some_and(|line| !line.is_empty());
        let has_city = address.city.as_deref().is_some_and(|city| !city.is_empty());
        if !has_line && !has_city {
            continue;
        }
        provider.locations.push(ProviderLocation {
            address: address.address_1.clone(),
            address2: address.address_2.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            zip: address.postal_code.clone(),
            phone: address.telephone_number.clone(),
        });
    }

    // First location's phone doubles as the provider's contact number
    provider.phone = provider
        .locations
        .first()
        .and_then(|location| location.phone.clone());

    provider.specialties = result
        .taxonomies
        .iter()
        .filter_map(|taxonomy| taxonomy.desc.clone())
        .collect();
    provider.specialty = provider.specialties.first().cloned();

    provider.provider_types = result
        .taxonomies
        .iter()
        .filter_map(|taxonomy| taxonomy.code.clone())
        .collect();

    Some(provider)
}

/// Organization name takes precedence; otherwise first+middle+last joined
/// with spaces, with a ", {credential}" suffix when present.
fn result_name(result: &NpiResult) -> Option<String> {
    let basic = result.basic.as_ref()?;

    if let Some(organization) = basic.organization_name.as_deref().filter(|n| !n.is_empty()) {
        return Some(organization.to_string());
    }

    let personal = [&basic.first_name, &basic.middle_name, &basic.last_name]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if personal.is_empty() {
        return None;
    }

    match basic.credential.as_deref().filter(|c| !c.is_empty()) {
        Some(credential) => Some(format!("{}, {}", personal, credential)),
        None => Some(personal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockNpiRegistry;
    use serde_json::json;

    fn response(value: serde_json::Value) -> NpiResponse {
        serde_json::from_value(value).unwrap()
    }

    fn request() -> ProviderSearchRequest {
        ProviderSearchRequest {
            zip: "43215".to_string(),
            city: "Columbus".to_string(),
            health_plan: "caresource".to_string(),
            provider_type_ids: vec![],
            radius: 25,
            specialty: Some("OB-GYN".to_string()),
            include_npi: true,
            accepts_pregnant_women: None,
            accepts_newborns: None,
            telehealth: None,
        }
    }

    #[test]
    fn organization_name_takes_precedence() {
        let response = response(json!({
            "results": [{
                "number": 1112223334u64,
                "basic": {
                    "organization_name": "Riverside Women's Health",
                    "first_name": "Amy",
                    "last_name": "Lee"
                }
            }]
        }));

        let providers = parse_results(&response);
        assert_eq!(providers[0].name, "Riverside Women's Health");
        assert_eq!(providers[0].npi.as_deref(), Some("1112223334"));
        assert_eq!(providers[0].source, ProviderSource::Registry);
    }

    #[test]
    fn personal_name_joins_parts_and_appends_credential() {
        let response = response(json!({
            "results": [
                {
                    "basic": {
                        "first_name": "Amy",
                        "middle_name": "B",
                        "last_name": "Lee",
                        "credential": "CNM"
                    }
                },
                {
                    "basic": { "first_name": "Jane", "last_name": "Doe" }
                }
            ]
        }));

        let providers = parse_results(&response);
        assert_eq!(providers[0].name, "Amy B Lee, CNM");
        assert_eq!(providers[1].name, "Jane Doe");
    }

    #[test]
    fn drops_results_without_any_name() {
        let response = response(json!({
            "results": [
                { "basic": { "credential": "MD" } },
                {},
                { "basic": { "organization_name": "Eastside Birth Center" } }
            ]
        }));

        let providers = parse_results(&response);
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].name, "Eastside Birth Center");
    }

    #[test]
    fn malformed_result_is_skipped_not_fatal() {
        // First result's "number" matches neither the int nor string shape
        let response = response(json!({
            "results": [
                { "number": {}, "basic": { "organization_name": "Broken Row" } },
                { "basic": { "organization_name": "Eastside Birth Center" } }
            ]
        }));

        let providers = parse_results(&response);

        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].name, "Eastside Birth Center");
    }

    #[test]
    fn first_address_phone_becomes_provider_phone() {
        let response = response(json!({
            "results": [{
                "basic": { "organization_name": "Eastside Birth Center" },
                "addresses": [
                    {
                        "address_1": "500 High St",
                        "address_2": "Floor 2",
                        "city": "Columbus",
                        "state": "OH",
                        "postal_code": "43215",
                        "telephone_number": "614-555-0199"
                    },
                    { "address_1": "9 Elm St", "city": "Dayton" }
                ]
            }]
        }));

        let providers = parse_results(&response);
        let provider = &providers[0];
        assert_eq!(provider.phone.as_deref(), Some("614-555-0199"));
        assert_eq!(provider.locations.len(), 2);
        assert_eq!(provider.locations[0].address2.as_deref(), Some("Floor 2"));
        assert_eq!(provider.locations[1].phone, None);
    }

    #[test]
    fn taxonomies_feed_specialties_and_provider_types() {
        let response = response(json!({
            "results": [{
                "basic": { "organization_name": "Eastside Birth Center" },
                "taxonomies": [
                    { "code": "207V00000X", "desc": "Obstetrics & Gynecology" },
                    { "code": "367A00000X", "desc": "Advanced Practice Midwife" }
                ]
            }]
        }));

        let providers = parse_results(&response);
        let provider = &providers[0];
        assert_eq!(provider.specialty.as_deref(), Some("Obstetrics & Gynecology"));
        assert_eq!(provider.provider_types, vec!["207V00000X", "367A00000X"]);
    }

    #[tokio::test]
    async fn registry_outage_degrades_to_empty() {
        let registry = MockNpiRegistry::new().with_failure();

        let providers = search_registry(&request(), "207V00000X", &registry).await;

        assert!(providers.is_empty());
        assert_eq!(registry.call_count(), 1);
    }

    #[tokio::test]
    async fn search_scopes_query_to_taxonomy_and_location() {
        let registry = MockNpiRegistry::new();

        search_registry(&request(), "207V00000X", &registry).await;

        let calls = registry.calls();
        assert_eq!(calls[0].taxonomy_code, "207V00000X");
        assert_eq!(calls[0].postal_code.as_deref(), Some("43215"));
        assert_eq!(calls[0].city.as_deref(), Some("Columbus"));
    }
}
