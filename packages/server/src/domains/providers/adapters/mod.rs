//! Source adapters: one per external directory.
//!
//! Each adapter owns the query shape and the conversion from its directory's
//! wire format into the canonical Provider. Call-level failures degrade to an
//! empty result set; a malformed individual record is skipped, never fatal.

pub mod medicaid;
pub mod registry;

pub use medicaid::search_medicaid;
pub use registry::search_registry;
