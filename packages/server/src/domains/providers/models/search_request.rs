/// A validated provider search, as the pipeline consumes it.
///
/// Field presence is enforced at the HTTP layer; by the time a request
/// reaches the pipeline every required field is non-empty.
#[derive(Debug, Clone)]
pub struct ProviderSearchRequest {
    pub zip: String,
    pub city: String,
    pub health_plan: String,
    pub provider_type_ids: Vec<String>,
    pub radius: u32,
    pub specialty: Option<String>,
    /// Include federal registry results even when Medicaid returns matches
    pub include_npi: bool,
    pub accepts_pregnant_women: Option<bool>,
    pub accepts_newborns: Option<bool>,
    pub telehealth: Option<bool>,
}
