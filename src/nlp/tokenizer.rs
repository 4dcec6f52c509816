//! Normalization, word splitting, and bigram emission
//!
//! Tokenization is deterministic: apostrophes are canonicalized before
//! lower-casing, and words are split on UAX #29 boundaries, which keep
//! mid-word apostrophes ("don't", "moss's") inside a single token.

use crate::ingest::canonicalize_apostrophes;
use unicode_segmentation::UnicodeSegmentation;

/// An adjacent word pair. Order is only needed to decide negation context
/// and is discarded once the pair is annotated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bigram {
    /// The context word (checked against the negation set)
    pub word_1: String,
    /// The word that gets annotated
    pub word_2: String,
}

/// Deterministic tokenizer producing normalized words and bigrams
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer
    pub fn new() -> Self {
        Self
    }

    /// Normalize text: canonicalize apostrophes, then lower-case.
    pub fn normalize(&self, text: &str) -> String {
        canonicalize_apostrophes(text).to_lowercase()
    }

    /// Split text into normalized words.
    ///
    /// Pure punctuation and symbols never become words; contractions and
    /// possessives stay whole.
    pub fn words(&self, text: &str) -> Vec<String> {
        let normalized = self.normalize(text);
        normalized
            .unicode_words()
            .filter(|w| w.chars().any(|c| c.is_alphanumeric()))
            .map(|w| w.to_string())
            .collect()
    }

    /// Emit overlapping bigrams over the word stream.
    ///
    /// N words yield N−1 bigrams. Only `word_2` positions are ever
    /// annotated downstream, so the first word of a text never becomes a
    /// token; a 0- or 1-word text yields no bigrams.
    pub fn bigrams(&self, text: &str) -> Vec<Bigram> {
        let words = self.words(text);
        words
            .windows(2)
            .map(|pair| Bigram {
                word_1: pair[0].clone(),
                word_2: pair[1].clone(),
            })
            .collect()
    }

    /// Whether a word is purely numeric (used to prune title stop-lists).
    pub fn is_numeric(word: &str) -> bool {
        !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
    }
}
