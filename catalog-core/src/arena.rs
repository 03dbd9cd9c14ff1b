//! Term Arena
//!
//! Stores every index term in one contiguous `String`. Terms are addressed by
//! dense ids and referenced by (offset, length) spans, so the term dictionary
//! costs one allocation instead of one per term.
//!
//! ## Memory Layout
//!
//! ```text
//! Arena Buffer: [bogota][cali][ingenieria][medicina]...
//!               ^       ^     ^           ^
//! Spans:       (0,6)   (6,4) (10,10)     (20,8) ...
//! ```
//!
//! The index pushes terms in sorted order, so term id `i` is also the rank of
//! the term in the dictionary.

/// Term reference: 6 bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TermSpan {
    offset: u32,
    len: u16,
}

impl TermSpan {
    #[inline(always)]
    const fn range(self) -> core::ops::Range<usize> {
        let start = self.offset as usize;
        start..start + self.len as usize
    }
}

/// Append-only storage for term text.
#[derive(Debug, Default)]
pub struct TermArena {
    buffer: String,
    spans: Vec<TermSpan>,
}

impl TermArena {
    /// Longest storable term in bytes.
    pub const MAX_TERM_LEN: usize = u16::MAX as usize;

    /// Creates a new arena with pre-allocated capacity.
    pub fn with_capacity(bytes: usize, terms: usize) -> Self {
        Self {
            buffer: String::with_capacity(bytes),
            spans: Vec::with_capacity(terms),
        }
    }

    /// Returns the number of stored terms.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns true if no terms are stored.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Total bytes of term text.
    #[inline(always)]
    pub fn text_bytes(&self) -> usize {
        self.buffer.len()
    }

    /// Appends a term and returns its id.
    ///
    /// Returns `None` if the term is longer than [`Self::MAX_TERM_LEN`] or
    /// the buffer would outgrow 32-bit offsets.
    pub fn push(&mut self, term: &str) -> Option<u32> {
        let len = u16::try_from(term.len()).ok()?;
        let offset = u32::try_from(self.buffer.len()).ok()?;
        offset.checked_add(u32::from(len))?;
        let id = u32::try_from(self.spans.len()).ok()?;

        self.buffer.push_str(term);
        self.spans.push(TermSpan { offset, len });
        Some(id)
    }

    /// Gets a term by id.
    #[inline(always)]
    pub fn get(&self, id: u32) -> Option<&str> {
        let span = self.spans.get(id as usize)?;
        self.buffer.get(span.range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_push_get() {
        let mut arena = TermArena::default();

        let a = arena.push("bogota").expect("should push");
        let b = arena.push("cali").expect("should push");
        let c = arena.push("medellin").expect("should push");

        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(arena.get(a), Some("bogota"));
        assert_eq!(arena.get(b), Some("cali"));
        assert_eq!(arena.get(c), Some("medellin"));
        assert_eq!(arena.get(3), None);
        assert_eq!(arena.text_bytes(), 18);
    }

    #[test]
    fn non_ascii_terms() {
        let mut arena = TermArena::with_capacity(64, 4);
        let id = arena.push("привет").expect("should push");
        assert_eq!(arena.get(id), Some("привет"));
    }

    #[test]
    fn term_too_long() {
        let mut arena = TermArena::default();
        assert!(arena.push(&"x".repeat(70_000)).is_none());
        assert!(arena.is_empty());

        let max = "x".repeat(TermArena::MAX_TERM_LEN);
        assert!(arena.push(&max).is_some());
        assert_eq!(arena.len(), 1);
    }
}
