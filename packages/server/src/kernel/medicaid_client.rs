use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::traits::BaseMedicaidDirectory;

/// Ceiling for directory calls; on timeout the caller degrades to empty.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Search parameters for the Medicaid directory bundle-search endpoint
#[derive(Debug, Clone)]
pub struct MedicaidQuery {
    pub zip: String,
    pub city: String,
    pub health_plan: String,
    pub provider_type_ids: Vec<String>,
    pub radius: u32,
    pub accepts_pregnant_women: Option<bool>,
    pub accepts_newborns: Option<bool>,
    pub telehealth: Option<bool>,
}

/// HTTP client for the state Medicaid provider directory
pub struct MedicaidDirectoryClient {
    endpoint: String,
    state: String,
    client: reqwest::Client,
}

impl MedicaidDirectoryClient {
    /// Create a new directory client for the given bundle-search endpoint
    pub fn new(endpoint: String, state: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            endpoint,
            state,
            client,
        })
    }

    /// Query keys are case-sensitive on the directory side; the mixed casing
    /// below is exactly what the API expects.
    fn query_params(&self, query: &MedicaidQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("state", self.state.clone()),
            ("zip", query.zip.clone()),
            ("City", query.city.clone()),
            ("healthplan", query.health_plan.clone()),
            (
                "ProviderTypeIDsDelimited",
                query.provider_type_ids.join(","),
            ),
            ("radius", query.radius.to_string()),
            ("Program", "1".to_string()),
        ];

        if let Some(flag) = query.accepts_pregnant_women {
            params.push(("AcceptsPregnantWomen", flag_param(flag)));
        }
        if let Some(flag) = query.accepts_newborns {
            params.push(("AcceptsNewborns", flag_param(flag)));
        }
        if let Some(flag) = query.telehealth {
            params.push(("Telehealth", flag_param(flag)));
        }

        params
    }
}

fn flag_param(flag: bool) -> String {
    if flag { "1" } else { "0" }.to_string()
}

#[async_trait]
impl BaseMedicaidDirectory for MedicaidDirectoryClient {
    async fn search(&self, query: &MedicaidQuery) -> Result<FhirBundle> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query_params(query))
            .send()
            .await
            .context("Failed to reach Medicaid directory")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Medicaid directory error {}: {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse Medicaid directory bundle")
    }
}

// =============================================================================
// Wire types - FHIR-style bundle
//
// The directory's payload is only loosely FHIR-shaped; every field is
// optional or defaulted and validated during conversion to Provider.
// Entries stay raw JSON here so one malformed entry cannot fail the whole
// bundle; the adapter try-parses them individually.
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FhirBundle {
    pub entry: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FhirEntry {
    pub resource: Option<FhirResource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FhirResource {
    pub name: Vec<FhirName>,
    #[serde(rename = "organizationName")]
    pub organization_name: Option<String>,
    pub address: Vec<FhirAddress>,
    #[serde(rename = "type")]
    pub provider_type: Vec<FhirConcept>,
    pub specialty: Vec<FhirSpecialty>,
    pub telecom: Vec<FhirTelecom>,
    pub identifier: Vec<FhirIdentifier>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FhirName {
    pub given: Vec<String>,
    pub family: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FhirAddress {
    pub line: Option<FhirLines>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "postalCode")]
    pub postal_code: Option<String>,
}

/// Address lines arrive either as a single string or a list of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FhirLines {
    One(String),
    Many(Vec<String>),
}

impl FhirLines {
    pub fn joined(&self) -> String {
        match self {
            FhirLines::One(line) => line.clone(),
            FhirLines::Many(lines) => lines.join(", "),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FhirLines::One(line) => line.is_empty(),
            FhirLines::Many(lines) => lines.iter().all(|line| line.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FhirConcept {
    pub coding: Vec<FhirCoding>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FhirCoding {
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FhirSpecialty {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FhirTelecom {
    pub system: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FhirIdentifier {
    pub system: Option<String>,
    pub value: Option<String>,
}
