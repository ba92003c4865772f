use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Full URL of the Medicaid directory bundle-search endpoint
    pub medicaid_directory_url: String,
    /// Base URL of the federal NPI registry API
    pub npi_registry_url: String,
    /// State both registries are scoped to
    pub home_state: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            medicaid_directory_url: env::var("MEDICAID_DIRECTORY_URL").unwrap_or_else(|_| {
                "https://providersearch.medicaid.ohio.gov/api/fhir/Practitioner/_search".to_string()
            }),
            npi_registry_url: env::var("NPI_REGISTRY_URL")
                .unwrap_or_else(|_| "https://npiregistry.cms.hhs.gov/api/".to_string()),
            home_state: env::var("HOME_STATE").unwrap_or_else(|_| "OH".to_string()),
        })
    }
}
