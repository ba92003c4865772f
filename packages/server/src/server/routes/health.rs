use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sqlx::PgPool;
use std::time::Duration;

use crate::server::app::AppState;

/// Ceiling on the enrichment-store round trip before the probe is declared
/// failed.
const STORE_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    enrichment_store: StoreHealth,
    pool: PoolStats,
}

#[derive(Serialize)]
pub struct StoreHealth {
    reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
pub struct PoolStats {
    size: u32,
    idle: usize,
}

/// Liveness endpoint: probes the enrichment store with a bounded round trip
/// and reports pool utilization. 200 when the store answers, 503 otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let enrichment_store = probe_store(&state.db_pool).await;
    let pool = PoolStats {
        size: state.db_pool.size(),
        idle: state.db_pool.num_idle(),
    };

    let (code, status) = if enrichment_store.reachable {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        code,
        Json(HealthResponse {
            status,
            enrichment_store,
            pool,
        }),
    )
}

async fn probe_store(pool: &PgPool) -> StoreHealth {
    match tokio::time::timeout(STORE_PROBE_TIMEOUT, sqlx::query("SELECT 1").execute(pool)).await {
        Ok(Ok(_)) => StoreHealth {
            reachable: true,
            error: None,
        },
        Ok(Err(error)) => StoreHealth {
            reachable: false,
            error: Some(format!("query failed: {}", error)),
        },
        Err(_) => StoreHealth {
            reachable: false,
            error: Some("probe timed out".to_string()),
        },
    }
}
