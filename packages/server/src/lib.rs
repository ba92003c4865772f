// Mama Health provider search API
//
// Finds maternal-care providers for Ohio Medicaid members by querying the
// state Medicaid directory and the federal NPI registry, normalizing both
// into one Provider shape, deduplicating, and enriching survivors with
// community ratings and trust tags from the local store.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
