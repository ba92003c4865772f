mod provider;
mod search_request;

pub use provider::{Provider, ProviderLocation, ProviderSource};
pub use search_request::ProviderSearchRequest;
