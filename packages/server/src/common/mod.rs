//! Shared types used across domains and the HTTP layer.

pub mod error;

pub use error::ApiError;
