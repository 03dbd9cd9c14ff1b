//! Search algorithm logic.

use std::borrow::Cow;
use std::ops::Range;

use crate::analyzer::{query_tokens, INLINE_QUERY_TOKENS};
use crate::index::types::{PostingBlock, RecordIndex};
use catalog_types::DocId;
use smallvec::SmallVec;

/// Prefix runs spanning more terms than this are unioned through a bitmap
/// instead of pairwise merges.
const MERGE_UNION_MAX_TERMS: usize = 4;

impl RecordIndex {
    /// Finds records whose indexed text has a prefix match for every token of
    /// `normalized_query`.
    ///
    /// The query must already be normalized. An empty query returns nothing;
    /// callers treat "no query" as "no text filtering" and never get here.
    ///
    /// Results are ascending by `DocId`, truncated to the candidate cap. The
    /// cap is a latency bound, not a completeness guarantee.
    pub fn search(&self, normalized_query: &str) -> Vec<DocId> {
        let tokens = query_tokens(normalized_query);
        if tokens.is_empty() || self.blocks.is_empty() {
            return Vec::new();
        }

        let mut lists: SmallVec<[Cow<'_, [DocId]>; INLINE_QUERY_TOKENS]> =
            SmallVec::with_capacity(tokens.len());
        for token in &tokens {
            let range = self.prefix_range(token);
            if range.is_empty() {
                return Vec::new();
            }
            lists.push(self.union_postings(range));
        }

        // Seed from the rarest token so intersections shrink fast.
        lists.sort_unstable_by_key(|list| list.len());

        let mut candidates = lists[0].to_vec();
        for list in &lists[1..] {
            Self::hard_intersect(&mut candidates, list);
            if candidates.is_empty() {
                return candidates;
            }
        }

        if candidates.len() > self.max_candidates {
            tracing::debug!(
                query = normalized_query,
                matched = candidates.len(),
                cap = self.max_candidates,
                "candidate cap reached, truncating"
            );
            candidates.truncate(self.max_candidates);
        }

        candidates
    }

    /// Postings of an exact term.
    pub fn postings_for(&self, term: &str) -> Option<&[DocId]> {
        let range = self.prefix_range(term);
        let first = range.start;
        (range.start < range.end && self.term(first) == term)
            .then(|| Self::block_postings(&self.blocks[first], &self.postings))
    }

    /// Dictionary ranks of every term starting with `prefix`.
    pub(crate) fn prefix_range(&self, prefix: &str) -> Range<usize> {
        let n = self.blocks.len();
        let start = self.partition_terms(0..n, |t| t < prefix);
        let end = self.partition_terms(start..n, |t| t.starts_with(prefix));
        start..end
    }

    /// First index in `range` where `pred` fails. `pred` must hold on a
    /// prefix of the range and fail on the rest.
    fn partition_terms(&self, range: Range<usize>, pred: impl Fn(&str) -> bool) -> usize {
        let (mut lo, mut hi) = (range.start, range.end);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if pred(self.term(mid)) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }

    #[inline(always)]
    pub(crate) fn term(&self, rank: usize) -> &str {
        self.terms.get(rank as u32).unwrap_or_default()
    }

    #[inline(always)]
    pub(crate) fn block_postings<'a>(block: &PostingBlock, postings: &'a [DocId]) -> &'a [DocId] {
        let start = block.offset as usize;
        &postings[start..start + block.len as usize]
    }

    /// Sorted, deduplicated union of the postings of a run of terms.
    fn union_postings(&self, range: Range<usize>) -> Cow<'_, [DocId]> {
        let blocks = &self.blocks[range];

        if let [only] = blocks {
            return Cow::Borrowed(Self::block_postings(only, &self.postings));
        }

        if blocks.len() <= MERGE_UNION_MAX_TERMS {
            let mut acc: Vec<DocId> = Vec::new();
            let mut out: Vec<DocId> = Vec::new();
            for block in blocks {
                out.clear();
                Self::merge_sorted_dedup(&acc, Self::block_postings(block, &self.postings), &mut out);
                std::mem::swap(&mut acc, &mut out);
            }
            return Cow::Owned(acc);
        }

        let mut seen = vec![false; self.num_records];
        let mut hits = 0usize;
        for block in blocks {
            for &doc_id in Self::block_postings(block, &self.postings) {
                let slot = &mut seen[doc_id as usize];
                if !*slot {
                    *slot = true;
                    hits += 1;
                }
            }
        }

        let mut out = Vec::with_capacity(hits);
        out.extend(
            seen.iter()
                .enumerate()
                .filter(|(_, &hit)| hit)
                .map(|(doc_id, _)| doc_id as DocId),
        );
        Cow::Owned(out)
    }

    pub(crate) fn merge_sorted_dedup(a: &[DocId], b: &[DocId], out: &mut Vec<DocId>) {
        let mut ai = 0usize;
        let mut bi = 0usize;

        while ai < a.len() && bi < b.len() {
            match a[ai].cmp(&b[bi]) {
                std::cmp::Ordering::Less => {
                    out.push(a[ai]);
                    ai += 1;
                }
                std::cmp::Ordering::Greater => {
                    out.push(b[bi]);
                    bi += 1;
                }
                std::cmp::Ordering::Equal => {
                    out.push(a[ai]);
                    ai += 1;
                    bi += 1;
                }
            }
        }

        out.extend_from_slice(&a[ai..]);
        out.extend_from_slice(&b[bi..]);
    }

    /// Keeps only candidates present in `postings`. Both inputs are sorted.
    #[inline(always)]
    fn hard_intersect(candidates: &mut Vec<DocId>, postings: &[DocId]) {
        let mut posting_idx = 0usize;

        candidates.retain(|&doc_id| {
            while posting_idx < postings.len() && postings[posting_idx] < doc_id {
                posting_idx += 1;
            }
            if posting_idx < postings.len() && postings[posting_idx] == doc_id {
                posting_idx += 1;
                true
            } else {
                false
            }
        });
    }
}
