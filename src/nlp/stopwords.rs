//! Stop-word list and negation-word set
//!
//! Both sets are read-only once built and are shared freely across
//! parallel workers. Entries pass through the same normalization as
//! review text so that apostrophe form can never break a membership
//! check.

use crate::ingest::canonicalize_apostrophes;
use rustc_hash::FxHashSet;

/// English stop words (Snowball-style list, contractions in straight-quote
/// form).
const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does", "doesn't",
    "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had", "hadn't",
    "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her", "here",
    "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd", "i'll",
    "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "let's",
    "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on",
    "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own",
    "same", "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some",
    "such", "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then",
    "there", "there's", "these", "they", "they'd", "they'll", "they're", "they've", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we",
    "we'd", "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's",
    "where", "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with",
    "won't", "would", "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves",
];

/// Words that flip the sentiment of the word immediately following them.
const NEGATION_WORDS: &[&str] = &[
    "not", "no", "never", "without", "neither", "nor", "hardly", "barely", "scarcely", "don't",
    "doesn't", "didn't", "isn't", "wasn't", "aren't", "weren't", "can't", "cannot", "couldn't",
    "won't", "wouldn't", "shouldn't", "hasn't", "haven't", "hadn't", "ain't", "lacks", "lacking",
];

/// Membership filter over the standard English stop-word list, optionally
/// extended with caller-supplied words.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    words: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwordFilter {
    /// Create a filter over the built-in English list
    pub fn new() -> Self {
        let words = ENGLISH_STOPWORDS
            .iter()
            .map(|w| normalize_entry(w))
            .collect();
        Self { words }
    }

    /// Extend the filter with additional stop words
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in extra {
            self.words.insert(normalize_entry(word.as_ref()));
        }
        self
    }

    /// Check whether a (normalized) word is a stop word
    pub fn is_stopword(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stop words in the filter
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The fixed set of negation words. Membership is an exact string match
/// against normalized tokens.
#[derive(Debug, Clone)]
pub struct NegationSet {
    words: FxHashSet<String>,
}

impl Default for NegationSet {
    fn default() -> Self {
        Self::new()
    }
}

impl NegationSet {
    /// Create the built-in negation set
    pub fn new() -> Self {
        let words = NEGATION_WORDS.iter().map(|w| normalize_entry(w)).collect();
        Self { words }
    }

    /// Build a negation set from explicit entries (replaces the built-ins)
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = entries
            .into_iter()
            .map(|w| normalize_entry(w.as_ref()))
            .collect();
        Self { words }
    }

    /// Check whether a (normalized) word negates its successor
    pub fn is_negation(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

fn normalize_entry(word: &str) -> String {
    canonicalize_apostrophes(word).to_lowercase()
}
