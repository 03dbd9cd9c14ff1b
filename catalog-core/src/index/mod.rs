//! Prefix-searchable inverted index over catalog records.
//!
//! Built once per dataset load, read-only afterwards.
//!
//! Memory Layout:
//! - Terms are stored sorted in a single arena; term `i` owns posting block `i`
//! - Posting lists are stored in a single contiguous array for cache efficiency
//! - A prefix maps to a contiguous run of blocks found by binary search
//!
//! Query tokens are prefix-matched independently and intersected with a
//! merge-join, so a record matches when every token prefixes one of its terms.

mod api;
mod builder;
mod search;
mod stats;
mod types;

pub use api::BuiltIndex;
pub use stats::IndexStats;
pub use types::RecordIndex;
