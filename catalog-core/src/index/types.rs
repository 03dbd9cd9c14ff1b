//! Index types and constants.

use crate::arena::TermArena;
use catalog_types::DocId;

/// Entry count above which term/doc pairs are radix-sorted.
pub const RADIX_SORT_THRESHOLD: usize = 512;

/// Postings of one dictionary term: a slice of the shared postings array.
///
/// Block `i` belongs to term `i` of the arena.
#[derive(Clone, Copy, Debug)]
pub struct PostingBlock {
    pub offset: u32,
    pub len: u32,
}

/// A (term, record) occurrence collected during a build.
///
/// `term` is a provisional id until the vocabulary is sorted, then its rank.
#[derive(Clone, Copy, Debug)]
pub struct TempTermEntry {
    pub term: u32,
    pub doc_id: DocId,
}

/// Prefix-searchable inverted index over normalized record text.
///
/// Terms live sorted in a [`TermArena`]. Their postings are sorted, deduplicated
/// record handles packed into one contiguous array, so every prefix maps to a
/// contiguous run of blocks.
///
/// The index is immutable once built. Rebuilding means constructing a new value
/// and replacing the old one wholesale.
#[derive(Debug)]
pub struct RecordIndex {
    pub(crate) terms: TermArena,
    pub(crate) blocks: Vec<PostingBlock>,
    pub(crate) postings: Vec<DocId>,
    pub(crate) num_records: usize,
    pub(crate) max_candidates: usize,
}

impl RecordIndex {
    /// A valid index over zero records.
    pub fn empty(max_candidates: usize) -> Self {
        Self {
            terms: TermArena::default(),
            blocks: Vec::new(),
            postings: Vec::new(),
            num_records: 0,
            max_candidates,
        }
    }

    /// Number of records the index was built over.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.num_records
    }

    /// Returns `true` if the index covers no records.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_records == 0
    }

    /// Number of distinct terms.
    #[inline(always)]
    #[must_use]
    pub fn num_terms(&self) -> usize {
        self.blocks.len()
    }

    /// Soft cap on candidates returned by [`RecordIndex::search`].
    #[inline(always)]
    #[must_use]
    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }
}
