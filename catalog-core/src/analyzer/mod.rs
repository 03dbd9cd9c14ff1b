//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Folds case and diacritics, collapses whitespace
//! - **Tokenizer**: Splits normalized text into index terms

pub mod normalizer;
pub mod tokenizer;

pub use normalizer::{contains_normalized, normalize, normalize_opt, NormalizerConfig, TextNormalizer};
pub use tokenizer::{query_tokens, Tokenizer, INLINE_QUERY_TOKENS};
