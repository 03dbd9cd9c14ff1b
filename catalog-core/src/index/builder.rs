//! Index building logic.

use crate::analyzer::{TextNormalizer, Tokenizer};
use crate::arena::TermArena;
use crate::index::types::{PostingBlock, RecordIndex, TempTermEntry, RADIX_SORT_THRESHOLD};
use catalog_types::{DocId, Record, SearchField};
use rustc_hash::FxHashMap;

/// Accumulates term occurrences record by record, then freezes them into a
/// [`RecordIndex`].
///
/// Records must be added in ascending `DocId` order.
pub struct IndexBuilder<'f> {
    fields: &'f [SearchField],
    normalizer: TextNormalizer,
    vocab: FxHashMap<Box<str>, u32>,
    vocab_terms: Vec<Box<str>>,
    entries: Vec<TempTermEntry>,
    field_buf: String,
    num_records: usize,
}

impl<'f> IndexBuilder<'f> {
    /// Creates a builder indexing `fields` of every record.
    pub fn new(fields: &'f [SearchField]) -> Self {
        Self {
            fields,
            normalizer: TextNormalizer::default(),
            vocab: FxHashMap::default(),
            vocab_terms: Vec::new(),
            entries: Vec::new(),
            field_buf: String::with_capacity(128),
            num_records: 0,
        }
    }

    /// Indexes one record and returns its normalized text cache.
    ///
    /// The cache joins the normalized indexed fields with single spaces, in
    /// field order, skipping empty ones.
    pub fn add(&mut self, doc_id: DocId, record: &Record) -> String {
        debug_assert!(
            doc_id as usize >= self.num_records,
            "index builder: records must arrive in DocId order"
        );

        let mut cache = String::with_capacity(128);

        for &field in self.fields {
            self.normalizer
                .normalize_into(record.field_text(field), &mut self.field_buf);
            if self.field_buf.is_empty() {
                continue;
            }

            let vocab = &mut self.vocab;
            let vocab_terms = &mut self.vocab_terms;
            let entries = &mut self.entries;
            Tokenizer::new(field).tokenize(&self.field_buf, |text, _, _| {
                if text.len() > TermArena::MAX_TERM_LEN {
                    return;
                }
                let term = match vocab.get(text) {
                    Some(&id) => id,
                    None => {
                        let id = vocab_terms.len() as u32;
                        vocab.insert(text.into(), id);
                        vocab_terms.push(text.into());
                        id
                    }
                };
                entries.push(TempTermEntry { term, doc_id });
            });

            if !cache.is_empty() {
                cache.push(' ');
            }
            cache.push_str(&self.field_buf);
        }

        self.num_records = self.num_records.max(doc_id as usize + 1);
        cache
    }

    /// Freezes the accumulated occurrences into an immutable index.
    pub fn finish(self, max_candidates: usize) -> RecordIndex {
        let Self {
            vocab_terms,
            mut entries,
            num_records,
            ..
        } = self;

        if vocab_terms.is_empty() {
            return RecordIndex {
                num_records,
                ..RecordIndex::empty(max_candidates)
            };
        }

        // Provisional ids follow first appearance; remap them to dictionary rank.
        let mut order: Vec<u32> = (0..vocab_terms.len() as u32).collect();
        order.sort_unstable_by(|&a, &b| vocab_terms[a as usize].cmp(&vocab_terms[b as usize]));

        let mut rank = vec![0u32; vocab_terms.len()];
        let text_bytes = vocab_terms.iter().map(|t| t.len()).sum();
        let mut terms = TermArena::with_capacity(text_bytes, vocab_terms.len());
        for (r, &provisional) in order.iter().enumerate() {
            rank[provisional as usize] = r as u32;
            terms.push(&vocab_terms[provisional as usize]);
        }

        for entry in &mut entries {
            entry.term = rank[entry.term as usize];
        }

        Self::sort_entries(&mut entries);
        let (blocks, postings) = Self::build_blocks_from_sorted(&entries);
        debug_assert_eq!(blocks.len(), terms.len());

        RecordIndex {
            terms,
            blocks,
            postings,
            num_records,
            max_candidates,
        }
    }

    /// Sorts entries by (term, doc_id).
    pub(crate) fn sort_entries(entries: &mut [TempTermEntry]) {
        if entries.len() < RADIX_SORT_THRESHOLD {
            entries.sort_unstable_by(|a, b| {
                a.term.cmp(&b.term).then_with(|| a.doc_id.cmp(&b.doc_id))
            });
            return;
        }

        let dummy = TempTermEntry { term: 0, doc_id: 0 };
        let mut aux = vec![dummy; entries.len()];

        // LSD passes: doc_id bytes first, then term bytes. An even number of
        // passes leaves the result back in `entries`.
        Self::radix_pass(entries, &mut aux, |e| e.doc_id as u8);
        Self::radix_pass(&aux, entries, |e| (e.doc_id >> 8) as u8);
        Self::radix_pass(entries, &mut aux, |e| (e.doc_id >> 16) as u8);
        Self::radix_pass(&aux, entries, |e| (e.doc_id >> 24) as u8);
        Self::radix_pass(entries, &mut aux, |e| e.term as u8);
        Self::radix_pass(&aux, entries, |e| (e.term >> 8) as u8);
        Self::radix_pass(entries, &mut aux, |e| (e.term >> 16) as u8);
        Self::radix_pass(&aux, entries, |e| (e.term >> 24) as u8);
    }

    #[inline(always)]
    fn radix_pass(
        src: &[TempTermEntry],
        dst: &mut [TempTermEntry],
        key_fn: impl Fn(&TempTermEntry) -> u8,
    ) {
        let mut offsets = [0usize; 256];
        for entry in src {
            offsets[key_fn(entry) as usize] += 1;
        }

        let mut sum = 0usize;
        for slot in offsets.iter_mut() {
            let count = *slot;
            *slot = sum;
            sum += count;
        }

        for entry in src {
            let k = key_fn(entry) as usize;
            dst[offsets[k]] = *entry;
            offsets[k] += 1;
        }
    }

    /// Groups sorted entries into one block per term, dropping repeated
    /// (term, doc) pairs.
    pub(crate) fn build_blocks_from_sorted(
        entries: &[TempTermEntry],
    ) -> (Vec<PostingBlock>, Vec<DocId>) {
        let Some(first) = entries.first() else {
            return (Vec::new(), Vec::new());
        };

        let mut blocks: Vec<PostingBlock> = Vec::new();
        let mut postings: Vec<DocId> = Vec::with_capacity(entries.len());

        let mut current_term = first.term;
        let mut current_offset = 0u32;
        let mut current_len = 0u32;
        let mut last_doc_id: Option<DocId> = None;

        for entry in entries {
            if entry.term != current_term {
                blocks.push(PostingBlock {
                    offset: current_offset,
                    len: current_len,
                });
                current_offset += current_len;
                current_term = entry.term;
                current_len = 0;
                last_doc_id = None;
            }

            if last_doc_id != Some(entry.doc_id) {
                postings.push(entry.doc_id);
                current_len += 1;
                last_doc_id = Some(entry.doc_id);
            }
        }

        blocks.push(PostingBlock {
            offset: current_offset,
            len: current_len,
        });

        (blocks, postings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radix_sort_matches_comparison_sort() {
        let n = RADIX_SORT_THRESHOLD * 4;
        let mut entries: Vec<TempTermEntry> = (0..n as u32)
            .map(|i| TempTermEntry {
                term: i.wrapping_mul(7919) % 1_000_003,
                doc_id: (n as u32 - 1 - i).wrapping_mul(65_537),
            })
            .collect();

        let mut reference = entries.clone();
        reference.sort_unstable_by(|a, b| a.term.cmp(&b.term).then(a.doc_id.cmp(&b.doc_id)));

        IndexBuilder::sort_entries(&mut entries);

        for (i, (got, want)) in entries.iter().zip(&reference).enumerate() {
            assert_eq!(
                (got.term, got.doc_id),
                (want.term, want.doc_id),
                "mismatch at index {i}"
            );
        }
    }

    #[test]
    fn small_input_sorted() {
        let mut entries: Vec<TempTermEntry> = (0..10u32)
            .map(|i| TempTermEntry {
                term: 10 - i,
                doc_id: i,
            })
            .collect();

        IndexBuilder::sort_entries(&mut entries);

        for w in entries.windows(2) {
            assert!((w[0].term, w[0].doc_id) <= (w[1].term, w[1].doc_id));
        }
    }

    #[test]
    fn blocks_dedupe_repeated_docs() {
        let entries = [
            TempTermEntry { term: 0, doc_id: 1 },
            TempTermEntry { term: 0, doc_id: 1 },
            TempTermEntry { term: 0, doc_id: 4 },
            TempTermEntry { term: 1, doc_id: 4 },
        ];
        let (blocks, postings) = IndexBuilder::build_blocks_from_sorted(&entries);
        assert_eq!(postings, [1, 4, 4]);
        assert_eq!(blocks.len(), 2);
        assert_eq!((blocks[0].offset, blocks[0].len), (0, 2));
        assert_eq!((blocks[1].offset, blocks[1].len), (2, 1));
    }

    #[test]
    fn empty_input_builds_empty_blocks() {
        let (blocks, postings) = IndexBuilder::build_blocks_from_sorted(&[]);
        assert!(blocks.is_empty());
        assert!(postings.is_empty());
    }
}
