//! Public construction API.

use crate::index::builder::IndexBuilder;
use crate::index::types::RecordIndex;
use catalog_types::{DocId, Record, SearchField};

/// Output of [`RecordIndex::build`].
#[derive(Debug)]
pub struct BuiltIndex {
    /// The inverted index.
    pub index: RecordIndex,
    /// Normalized text cache, parallel to the input records.
    pub texts: Vec<String>,
}

impl RecordIndex {
    /// Builds an index over `fields` of every record.
    ///
    /// Record `i` gets `DocId` `i`. Zero records produce a valid, empty index.
    /// Construction is linear in the number of tokens plus one sort of the
    /// (term, record) pairs.
    ///
    /// Callers guarantee `records.len()` fits in a [`DocId`].
    pub fn build(records: &[Record], fields: &[SearchField], max_candidates: usize) -> BuiltIndex {
        let mut builder = IndexBuilder::new(fields);
        let texts = records
            .iter()
            .enumerate()
            .map(|(i, record)| builder.add(i as DocId, record))
            .collect();

        BuiltIndex {
            index: builder.finish(max_candidates),
            texts,
        }
    }
}
