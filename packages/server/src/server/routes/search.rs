use axum::extract::{Extension, Query};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::ApiError;
use crate::domains::providers::models::{Provider, ProviderSearchRequest};
use crate::domains::providers::search::search_providers;
use crate::server::app::AppState;

/// Query parameters for the provider search endpoint.
///
/// The required fields are enforced by extraction: a missing key rejects the
/// request with 400 before the handler runs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub zip: String,
    pub city: String,
    pub health_plan: String,
    /// Comma-joined plan provider-type IDs
    pub provider_type_ids: String,
    pub radius: u32,
    pub specialty: Option<String>,
    #[serde(default)]
    pub include_npi: bool,
    pub accepts_pregnant_women: Option<bool>,
    pub accepts_newborns: Option<bool>,
    pub telehealth: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub providers: Vec<Provider>,
    pub count: usize,
}

impl SearchParams {
    /// Reject empty required values; extraction only guarantees presence.
    fn into_request(self) -> Result<ProviderSearchRequest, ApiError> {
        let provider_type_ids: Vec<String> = self
            .provider_type_ids
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect();

        for (value, field) in [
            (&self.zip, "zip"),
            (&self.city, "city"),
            (&self.health_plan, "healthPlan"),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::BadRequest(format!("{} must not be empty", field)));
            }
        }
        if provider_type_ids.is_empty() {
            return Err(ApiError::BadRequest(
                "providerTypeIds must not be empty".to_string(),
            ));
        }

        Ok(ProviderSearchRequest {
            zip: self.zip,
            city: self.city,
            health_plan: self.health_plan,
            provider_type_ids,
            radius: self.radius,
            specialty: self.specialty,
            include_npi: self.include_npi,
            accepts_pregnant_women: self.accepts_pregnant_women,
            accepts_newborns: self.accepts_newborns,
            telehealth: self.telehealth,
        })
    }
}

/// Provider search endpoint
pub async fn search_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let request = params.into_request()?;
    info!(
        zip = %request.zip,
        city = %request.city,
        health_plan = %request.health_plan,
        include_npi = request.include_npi,
        "Searching providers"
    );

    let providers = search_providers(&request, &state.policy, state.deps.as_ref()).await;

    Ok(Json(SearchResponse {
        count: providers.len(),
        providers,
    }))
}
