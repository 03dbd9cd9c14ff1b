//! Core types for the catalog search engine.
//!
//! This crate holds the data shared between the engine and its consumers:
//!
//! - **Records**: one (institution, program) pairing per entry
//! - **Filters**: the facet specification evaluated against each record
//! - **Configuration**: tunables for indexing, search and pagination
//! - **Errors**: the build-time error channel
//!
//! Nothing here depends on the engine, so rendering layers can share the
//! types without pulling in the index.

#![warn(missing_docs)]

mod config;
mod error;
mod filter;
mod record;

pub use config::{CatalogConfig, DEFAULT_FREE_TUITION_MARKER};
pub use error::{CatalogError, ParseLabelError, Result};
pub use filter::FilterSpec;
pub use record::{
    BillingUnit, Institution, InstitutionCategory, Level, Modality, PriceRange, Program, Record,
    SearchField, TuitionBand,
};

/// Dense record handle.
///
/// A record's `DocId` is its position in the dataset the catalog was built
/// from, so sorting by `DocId` restores original insertion order.
pub type DocId = u32;
