//! Collapses records describing the same real-world provider.
//!
//! Matching is deterministic: an NPI when present, otherwise a normalized
//! name+location key. No edit-distance or probabilistic scoring — two
//! providers with trivially different spellings and no shared NPI stay
//! distinct.

use std::collections::HashSet;

use super::models::Provider;

/// Remove duplicates, preserving first-occurrence order.
///
/// First seen wins, so the aggregator's call order (Medicaid before
/// Registry) decides which copy survives.
pub fn dedup_providers(providers: Vec<Provider>) -> Vec<Provider> {
    let mut seen = HashSet::new();
    providers
        .into_iter()
        .filter(|provider| seen.insert(identity_key(provider)))
        .collect()
}

/// Identity key for a record, strongest evidence first:
/// NPI, then name + first-location city/zip, then name alone.
pub fn identity_key(provider: &Provider) -> String {
    if let Some(npi) = &provider.npi {
        return format!("npi:{}", npi);
    }

    if let Some(location) = provider.locations.first() {
        return format!(
            "{}_{}_{}",
            normalize(&provider.name),
            normalize(location.city.as_deref().unwrap_or_default()),
            normalize(location.zip.as_deref().unwrap_or_default()),
        );
    }

    format!("name_{}", normalize(&provider.name))
}

/// Lowercase, then squash every character outside [a-z0-9_] to '_'.
fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::providers::models::{ProviderLocation, ProviderSource};

    fn provider(name: &str, source: ProviderSource) -> Provider {
        Provider::new(name.to_string(), source)
    }

    fn located(name: &str, city: &str, zip: &str) -> Provider {
        let mut p = provider(name, ProviderSource::Medicaid);
        p.locations.push(ProviderLocation {
            address: Some("12 Main St".to_string()),
            city: Some(city.to_string()),
            zip: Some(zip.to_string()),
            ..Default::default()
        });
        p
    }

    #[test]
    fn same_npi_keeps_first_seen_record() {
        let mut medicaid = provider("Dr. Amy Lee", ProviderSource::Medicaid);
        medicaid.npi = Some("1234567890".to_string());
        let mut registry = provider("Amy Lee MD", ProviderSource::Registry);
        registry.npi = Some("1234567890".to_string());

        let unique = dedup_providers(vec![medicaid, registry]);

        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].name, "Dr. Amy Lee");
        assert_eq!(unique[0].source, ProviderSource::Medicaid);
    }

    #[test]
    fn name_only_key_has_name_prefix() {
        let jane = provider("Jane Doe", ProviderSource::Medicaid);
        assert_eq!(identity_key(&jane), "name_jane_doe");
    }

    #[test]
    fn identical_names_without_locations_collapse() {
        let unique = dedup_providers(vec![
            provider("Jane Doe", ProviderSource::Medicaid),
            provider("Jane Doe", ProviderSource::Registry),
        ]);

        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].source, ProviderSource::Medicaid);
    }

    #[test]
    fn location_key_includes_city_and_zip() {
        let amy = located("Dr. Amy Lee", "Columbus", "43215");
        assert_eq!(identity_key(&amy), "dr__amy_lee_columbus_43215");
    }

    #[test]
    fn different_cities_stay_distinct() {
        let unique = dedup_providers(vec![
            located("Dr. Amy Lee", "Columbus", "43215"),
            located("Dr. Amy Lee", "Dayton", "45402"),
        ]);

        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn npi_outranks_matching_name_and_location() {
        let mut with_npi = located("Dr. Amy Lee", "Columbus", "43215");
        with_npi.npi = Some("1234567890".to_string());
        let without_npi = located("Dr. Amy Lee", "Columbus", "43215");

        // Different key tiers, so both survive
        let unique = dedup_providers(vec![with_npi, without_npi]);
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn dedup_is_idempotent() {
        let input = vec![
            located("Dr. Amy Lee", "Columbus", "43215"),
            located("Dr. Amy Lee", "Columbus", "43215"),
            provider("Jane Doe", ProviderSource::Registry),
        ];

        let once = dedup_providers(input);
        let twice = dedup_providers(once.clone());

        assert_eq!(once, twice);
    }
}
