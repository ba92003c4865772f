use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::traits::BaseNpiRegistry;

/// Ceiling for registry calls; on timeout the caller degrades to empty.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Hard cap on results requested per registry search
const RESULT_LIMIT: u32 = 50;

/// NPPES API version pinned by the registry contract
const API_VERSION: &str = "2.1";

/// Search parameters for the federal NPI registry
#[derive(Debug, Clone)]
pub struct NpiQuery {
    pub taxonomy_code: String,
    pub postal_code: Option<String>,
    pub city: Option<String>,
}

/// HTTP client for the federal NPI registry (NPPES)
pub struct NpiRegistryClient {
    base_url: String,
    state: String,
    client: reqwest::Client,
}

impl NpiRegistryClient {
    /// Create a new registry client
    pub fn new(base_url: String, state: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            state,
            client,
        })
    }

    fn query_params(&self, query: &NpiQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("version", API_VERSION.to_string()),
            ("state", self.state.clone()),
            ("taxonomy_code", query.taxonomy_code.clone()),
            ("limit", RESULT_LIMIT.to_string()),
        ];

        if let Some(postal_code) = &query.postal_code {
            params.push(("postal_code", postal_code.clone()));
        }
        if let Some(city) = &query.city {
            params.push(("city", city.clone()));
        }

        params
    }
}

#[async_trait]
impl BaseNpiRegistry for NpiRegistryClient {
    async fn search(&self, query: &NpiQuery) -> Result<NpiResponse> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query_params(query))
            .send()
            .await
            .context("Failed to reach NPI registry")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("NPI registry error {}: {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse NPI registry response")
    }
}

// =============================================================================
// Wire types - NPPES result shape
//
// Every field is optional or defaulted; records are validated during
// conversion to Provider. Results stay raw JSON here so one malformed
// result cannot fail the whole response; the adapter try-parses them
// individually.
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NpiResponse {
    pub results: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NpiResult {
    pub number: Option<NpiNumber>,
    pub basic: Option<NpiBasic>,
    pub addresses: Vec<NpiAddress>,
    pub taxonomies: Vec<NpiTaxonomy>,
}

/// NPPES serializes the NPI as a bare number in some responses and a string
/// in others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NpiNumber {
    Int(u64),
    Text(String),
}

impl NpiNumber {
    pub fn as_string(&self) -> String {
        match self {
            NpiNumber::Int(number) => number.to_string(),
            NpiNumber::Text(number) => number.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NpiBasic {
    pub organization_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub credential: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NpiAddress {
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub telephone_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NpiTaxonomy {
    pub code: Option<String>,
    pub desc: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_pin_version_state_and_limit() {
        let client =
            NpiRegistryClient::new("https://example.test/api/".to_string(), "OH".to_string())
                .unwrap();
        let query = NpiQuery {
            taxonomy_code: "207V00000X".to_string(),
            postal_code: Some("43215".to_string()),
            city: Some("Columbus".to_string()),
        };

        let params = client.query_params(&query);

        assert_eq!(
            params,
            vec![
                ("version", "2.1".to_string()),
                ("state", "OH".to_string()),
                ("taxonomy_code", "207V00000X".to_string()),
                ("limit", "50".to_string()),
                ("postal_code", "43215".to_string()),
                ("city", "Columbus".to_string()),
            ]
        );
    }

    #[test]
    fn npi_number_parses_integer_and_string() {
        let int_result: NpiResult =
            serde_json::from_value(serde_json::json!({ "number": 1234567890u64 })).unwrap();
        let text_result: NpiResult =
            serde_json::from_value(serde_json::json!({ "number": "1234567890" })).unwrap();

        assert_eq!(int_result.number.unwrap().as_string(), "1234567890");
        assert_eq!(text_result.number.unwrap().as_string(), "1234567890");
    }
}
