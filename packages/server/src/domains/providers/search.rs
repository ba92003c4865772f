//! The full search pipeline: aggregate -> dedup -> enrich.

use tracing::info;

use super::aggregate::{aggregate_providers, SearchPolicy};
use super::dedup::dedup_providers;
use super::enrich::enrich_providers;
use super::models::{Provider, ProviderSearchRequest};
use crate::kernel::ServerDeps;

/// Run a provider search end to end.
///
/// Upstream failures never surface here: adapters degrade to empty result
/// sets and enrichment failures are isolated per record, so a search always
/// produces a response.
pub async fn search_providers(
    request: &ProviderSearchRequest,
    policy: &SearchPolicy,
    deps: &ServerDeps,
) -> Vec<Provider> {
    let raw = aggregate_providers(request, policy, deps).await;
    let raw_count = raw.len();

    let unique = dedup_providers(raw);
    info!(
        raw = raw_count,
        unique = unique.len(),
        "Deduplicated provider records"
    );

    enrich_providers(unique, deps.enrichment.as_ref()).await
}
