//! Domain types for the vocabulary store.
//!
//! This module provides:
//! - Kanji extraction used to build the per-word kanji index
//! - UTC timestamps with a sortable storage encoding
//! - Word records and category normalization

pub mod kanji;
pub mod timestamp;
pub mod word;

pub use kanji::{extract_kanji, index_entries, is_kanji, KANJI_PLACEHOLDER};
pub use timestamp::Timestamp;
pub use word::{
    normalize_categories, CategoryInput, Word, WordDraft, EXAMPLE_SENTENCE_CATEGORY,
};
