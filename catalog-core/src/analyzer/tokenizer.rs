//! Streaming Tokenizer Module
//!
//! Splits normalized text into the terms stored in the record index. It is the
//! second stage of the text pipeline: the normalizer produces clean lowercase
//! text and the tokenizer cuts it into searchable units.
//!
//! ## What It Does
//!
//! Given normalized input like `"ingenieria de software"`, it emits each word
//! together with the record field it came from and its position:
//!
//! ```ignore
//! ("ingenieria", SearchField::Title, 0)
//! ("de", SearchField::Title, 1)
//! ("software", SearchField::Title, 2)
//! ```
//!
//! ## Separators
//!
//! Every character that is not alphanumeric separates tokens, so
//! `"bogota, d.c."` yields `bogota`, `d` and `c`, and `"ingles–espanol"`
//! yields `ingles` and `espanol`. This covers Unicode punctuation common in
//! Spanish text (`¿ ¡ « » “ ” – ·`) as well as ASCII.
//!
//! ## Zero Allocation
//!
//! Tokens are slices of the input, emitted through a callback. Query parsing
//! collects them into a `SmallVec` that stays on the stack for typical input.

use catalog_types::SearchField;
use smallvec::SmallVec;

/// Query tokens kept inline before the token list spills to the heap.
pub const INLINE_QUERY_TOKENS: usize = 16;

/// Streaming tokenizer bound to one record field.
///
/// ## The Contract
///
/// Input must come from [`TextNormalizer`](super::TextNormalizer). Debug
/// builds assert that no uppercase ASCII slipped through.
///
/// ## Example
///
/// ```
/// use catalog_core::analyzer::Tokenizer;
/// use catalog_types::SearchField;
///
/// let tokenizer = Tokenizer::new(SearchField::City);
/// let mut count = 0;
/// tokenizer.tokenize("bogota, d.c.", |_text, _field, _pos| count += 1);
/// assert_eq!(count, 3);
/// ```
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct Tokenizer {
    field: SearchField,
}

impl Tokenizer {
    /// Creates a new tokenizer for the specified field.
    #[inline]
    pub const fn new(field: SearchField) -> Self {
        Self { field }
    }

    /// Tokenizes normalized input and emits `(text, field, position)`.
    ///
    /// Position is `u32`. After emitting a token at position `u32::MAX`,
    /// further emissions stop.
    #[inline]
    pub fn tokenize<'n, F>(&self, normalized: &'n str, mut emit: F)
    where
        F: FnMut(&'n str, SearchField, u32),
    {
        debug_assert!(
            !normalized.bytes().any(|b| b.is_ascii_uppercase()),
            "tokenizer: uppercase input, normalizer contract violated"
        );

        let field = self.field;
        let mut start: Option<usize> = None;
        let mut pos = 0u32;

        for (i, c) in normalized.char_indices() {
            if is_separator(c) {
                if let Some(s) = start.take() {
                    emit(&normalized[s..i], field, pos);
                    if pos == u32::MAX {
                        return;
                    }
                    pos += 1;
                }
            } else if start.is_none() {
                start = Some(i);
            }
        }

        if let Some(s) = start {
            emit(&normalized[s..], field, pos);
        }
    }
}

/// Splits a normalized query into distinct tokens, first occurrence first.
///
/// Every token is kept; lists longer than [`INLINE_QUERY_TOKENS`] spill to
/// the heap.
pub fn query_tokens(normalized: &str) -> SmallVec<[&str; INLINE_QUERY_TOKENS]> {
    let mut tokens: SmallVec<[&str; INLINE_QUERY_TOKENS]> = SmallVec::new();
    Tokenizer::new(SearchField::Title).tokenize(normalized, |text, _, _| {
        if !tokens.contains(&text) {
            tokens.push(text);
        }
    });
    tokens
}

#[inline(always)]
fn is_separator(c: char) -> bool {
    !c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str, field: SearchField) -> Vec<(&str, SearchField, u32)> {
        let mut out = Vec::new();
        Tokenizer::new(field).tokenize(input, |text, f, pos| {
            out.push((text, f, pos));
        });
        out
    }

    fn texts(input: &str) -> Vec<&str> {
        collect(input, SearchField::Title)
            .into_iter()
            .map(|(t, _, _)| t)
            .collect()
    }

    #[test]
    fn single_word() {
        let out = collect("medicina", SearchField::Title);
        assert_eq!(out, [("medicina", SearchField::Title, 0)]);
    }

    #[test]
    fn positions_are_sequential() {
        let out = collect("tecnico en sistemas informaticos", SearchField::Title);
        assert_eq!(out.len(), 4);
        for (i, (_, _, pos)) in out.iter().enumerate() {
            assert_eq!(*pos, i as u32);
        }
    }

    #[test]
    fn punctuation_separates() {
        assert_eq!(texts("bogota, d.c."), ["bogota", "d", "c"]);
        assert_eq!(texts("ciencias (salud)/bienestar"), ["ciencias", "salud", "bienestar"]);
        assert_eq!(texts("e-learning"), ["e", "learning"]);
    }

    #[test]
    fn digits_are_token_bytes() {
        assert_eq!(texts("ingles b2 nivel 3"), ["ingles", "b2", "nivel", "3"]);
    }

    #[test]
    fn non_ascii_stays_inside_tokens() {
        assert_eq!(texts("привет мир"), ["привет", "мир"]);
    }

    #[test]
    fn empty_and_separator_only_emit_nothing() {
        assert!(texts("").is_empty());
        assert!(texts(" , . ").is_empty());
    }

    #[test]
    fn field_propagated_to_all_tokens() {
        let out = collect("santa marta", SearchField::City);
        assert!(out.iter().all(|(_, f, _)| *f == SearchField::City));
    }

    #[test]
    fn tokens_are_slices_of_input() {
        let input = String::from("hola mundo");
        let base = input.as_ptr() as usize;
        let end = base + input.len();

        Tokenizer::new(SearchField::Title).tokenize(&input, |text, _, _| {
            let ptr = text.as_ptr() as usize;
            assert!(ptr >= base && ptr < end);
        });
    }

    #[test]
    fn unicode_punctuation_separates() {
        assert_eq!(texts("ingles–espanol"), ["ingles", "espanol"]);
        assert_eq!(texts("diseno “software”"), ["diseno", "software"]);
        assert_eq!(texts("¿medicina?"), ["medicina"]);
        assert_eq!(texts("¡becas! «2024» l·l"), ["becas", "2024", "l", "l"]);
    }

    #[test]
    fn query_tokens_dedup() {
        assert_eq!(
            query_tokens("software de software").as_slice(),
            ["software", "de"]
        );
    }

    #[test]
    fn long_queries_keep_every_token() {
        let long: String = (0..40).map(|i| format!("t{i} ")).collect();
        let tokens = query_tokens(long.trim_end());
        assert_eq!(tokens.len(), 40);
        assert!(tokens.spilled());
        assert_eq!(tokens[39], "t39");
    }
}
