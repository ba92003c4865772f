//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::Extension;
use axum::routing::get;
use axum::Router;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::providers::aggregate::SearchPolicy;
use crate::domains::providers::data::PgEnrichmentStore;
use crate::kernel::{MedicaidDirectoryClient, NpiRegistryClient, ServerDeps};
use crate::server::routes::{health_handler, search_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
    pub policy: SearchPolicy,
}

/// Build the Axum application router with live external clients.
pub fn build_app(pool: PgPool, config: &Config) -> Result<Router> {
    let medicaid = Arc::new(MedicaidDirectoryClient::new(
        config.medicaid_directory_url.clone(),
        config.home_state.clone(),
    )?);
    let npi_registry = Arc::new(NpiRegistryClient::new(
        config.npi_registry_url.clone(),
        config.home_state.clone(),
    )?);
    let enrichment = Arc::new(PgEnrichmentStore::new(pool.clone()));

    let state = AppState {
        db_pool: pool,
        deps: Arc::new(ServerDeps::new(medicaid, npi_registry, enrichment)),
        policy: SearchPolicy::default(),
    };

    Ok(Router::new()
        .route("/health", get(health_handler))
        .route("/api/providers/search", get(search_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()))
}
