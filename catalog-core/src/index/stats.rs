//! Statistics and IndexStats.

use crate::index::types::RecordIndex;
use catalog_types::DocId;

/// A snapshot of index statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of records covered.
    pub num_records: usize,
    /// Number of distinct terms.
    pub num_terms: usize,
    /// Total number of postings.
    pub total_postings: usize,
    /// Bytes of term text in the dictionary.
    pub term_bytes: usize,
}

impl RecordIndex {
    /// Returns index statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            num_records: self.num_records,
            num_terms: self.blocks.len(),
            total_postings: self.postings.len(),
            term_bytes: self.terms.text_bytes(),
        }
    }
}

impl IndexStats {
    /// Returns approximate memory usage in bytes.
    pub fn memory_usage_bytes(&self) -> usize {
        let blocks = self.num_terms * std::mem::size_of::<u32>() * 2;
        let spans = self.num_terms * 6;
        let postings = self.total_postings * std::mem::size_of::<DocId>();
        blocks + spans + postings + self.term_bytes
    }
}

impl core::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} records, {} terms, {} postings, ~{} bytes",
            self.num_records,
            self.num_terms,
            self.total_postings,
            self.memory_usage_bytes()
        )
    }
}
