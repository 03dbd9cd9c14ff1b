//! In-memory search and facet filter engine for program catalogs.
//!
//! The pipeline, per query:
//!
//! 1. [`analyzer`] normalizes the query (case, accents, whitespace)
//! 2. [`index`] resolves it to candidates by per-token prefix match
//! 3. [`filter`] applies the facet predicate
//! 4. [`pager`] slices the survivors into pages
//!
//! [`Catalog`] owns the dataset and its index; [`planner::plan`] runs steps
//! 1 through 3. Everything on the query path is synchronous and infallible.
//!
//! ```no_run
//! use catalog_core::{paginate, Catalog, FilterSpec};
//! # fn records() -> Vec<catalog_core::Record> { Vec::new() }
//!
//! let catalog = Catalog::build(records())?;
//! let filter = FilterSpec::new().with_city_query("bogota").with_max_tuition(10_000_000);
//! let docs = catalog.search("ingenieria", &filter);
//! let page = paginate(&docs, 20, 1);
//! for record in catalog.hydrate(page.items) {
//!     println!("{}", record.program.title);
//! }
//! # Ok::<(), catalog_core::CatalogError>(())
//! ```

pub mod analyzer;
pub mod arena;
pub mod facets;
pub mod filter;
pub mod index;
pub mod pager;
pub mod params;
pub mod planner;
pub mod session;

mod catalog;

#[cfg(test)]
mod fixtures;

pub use catalog::Catalog;
pub use filter::{is_free_provider, FilterPredicate};
pub use index::{IndexStats, RecordIndex};
pub use pager::{page_window, paginate, Page};
pub use params::SearchParams;
pub use session::CatalogSession;

pub use catalog_types::{
    CatalogConfig, CatalogError, DocId, FilterSpec, Institution, InstitutionCategory, Level,
    Modality, Program, Record, Result, SearchField, TuitionBand,
};
