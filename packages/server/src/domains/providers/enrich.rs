//! Attaches community data to deduplicated providers.
//!
//! Enrichment only augments: it never creates identities and never touches
//! the fields the adapters produced. A lookup failure for one provider is
//! isolated to that provider.

use anyhow::Result;
use futures::future;
use tracing::warn;

use super::models::Provider;
use crate::domains::providers::data::StoredProvider;
use crate::kernel::traits::BaseEnrichmentStore;

/// Result cap for name-based provider lookup
const NAME_LOOKUP_LIMIT: i64 = 10;

/// Result cap for review aggregation
const REVIEW_LOOKUP_LIMIT: i64 = 50;

/// Enrich every provider against the local store.
///
/// Lookups for distinct providers are independent and run concurrently.
pub async fn enrich_providers(
    providers: Vec<Provider>,
    store: &dyn BaseEnrichmentStore,
) -> Vec<Provider> {
    let lookups = providers
        .into_iter()
        .map(|provider| enrich_provider(provider, store));
    future::join_all(lookups).await
}

/// Enrich one provider, passing it through untouched on any store failure.
async fn enrich_provider(mut provider: Provider, store: &dyn BaseEnrichmentStore) -> Provider {
    if let Err(error) = try_enrich(&mut provider, store).await {
        warn!(
            provider = %provider.name,
            error = %error,
            "Enrichment lookup failed, returning provider unenriched"
        );
    }
    provider
}

async fn try_enrich(provider: &mut Provider, store: &dyn BaseEnrichmentStore) -> Result<()> {
    let Some(stored) = find_stored_match(provider, store).await? else {
        return Ok(());
    };

    let reviews = store
        .reviews_for_provider(stored.id, REVIEW_LOOKUP_LIMIT)
        .await?;

    // All fallible work is done; mutation below cannot leave the record
    // half-enriched.
    provider.id = Some(stored.id);
    if reviews.is_empty() {
        // No live reviews: keep the stored aggregates, even when they are
        // stale relative to a rating that has since dropped to zero reviews.
        provider.rating = stored.rating;
        provider.review_count = stored.review_count;
    } else {
        let total: f64 = reviews.iter().map(|review| review.rating).sum();
        provider.rating = Some(total / reviews.len() as f64);
        provider.review_count = reviews.len() as i64;
    }
    provider.mama_approved = stored.mama_approved;
    provider.mama_approved_count = stored.mama_approved_count;
    provider.identity_tags = stored.identity_tags.clone();

    Ok(())
}

/// Locate the stored record for a provider: by NPI first, then by exact name
/// plus a city/zip match against the provider's first location.
async fn find_stored_match(
    provider: &Provider,
    store: &dyn BaseEnrichmentStore,
) -> Result<Option<StoredProvider>> {
    if let Some(npi) = &provider.npi {
        if let Some(stored) = store.find_by_npi(npi).await? {
            return Ok(Some(stored));
        }
    }

    let Some(first) = provider.locations.first() else {
        return Ok(None);
    };
    let (Some(city), Some(zip)) = (&first.city, &first.zip) else {
        return Ok(None);
    };

    let candidates = store.find_by_name(&provider.name, NAME_LOOKUP_LIMIT).await?;
    Ok(candidates.into_iter().find(|candidate| {
        candidate.locations.iter().any(|location| {
            location.city.as_deref() == Some(city.as_str())
                && location.zip.as_deref() == Some(zip.as_str())
        })
    }))
}
