//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod medicaid_client;
pub mod npi_client;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use medicaid_client::{FhirBundle, MedicaidDirectoryClient, MedicaidQuery};
pub use npi_client::{NpiQuery, NpiRegistryClient, NpiResponse};
pub use test_dependencies::{
    stored_provider, InMemoryEnrichmentStore, MockMedicaidDirectory, MockNpiRegistry,
    TestDependencies,
};
pub use traits::*;
