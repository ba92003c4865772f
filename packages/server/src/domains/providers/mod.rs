//! Provider search domain
//!
//! The request pipeline: adapters normalize both external directories into
//! the canonical Provider shape, the aggregator orders and concatenates
//! their output, dedup collapses records describing the same real-world
//! provider, and enrichment attaches community data from the local store.

pub mod adapters;
pub mod aggregate;
pub mod data;
pub mod dedup;
pub mod enrich;
pub mod models;
pub mod search;
pub mod taxonomy;
