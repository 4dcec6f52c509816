//! Read-only sentiment lexicons
//!
//! Two independent lexicons drive annotation: an intensity lexicon
//! (word → integer in -5..=5, AFINN-style) and a polarity lexicon
//! (word → positive/negative, Bing-style). Both are plain key-value
//! lookups passed explicitly into the annotator — no ambient global
//! state. A missing entry is `None`, never a neutral zero.

use crate::errors::Result;
use crate::ingest::canonicalize_apostrophes;
use crate::types::Polarity;
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Intensity lexicon: word → signed strength in -5..=5
#[derive(Debug, Clone, Default)]
pub struct IntensityLexicon {
    entries: FxHashMap<String, i8>,
}

impl IntensityLexicon {
    /// Build from (word, value) pairs. Keys are normalized like review text.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, i8)>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(w, v)| (normalize_key(w.as_ref()), v))
            .collect();
        Self { entries }
    }

    /// Load from a JSON object mapping words to integer values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let map: FxHashMap<String, i8> = serde_json::from_str(json)?;
        Ok(Self::from_entries(map))
    }

    /// Look up a word. Absent entries yield `None`.
    pub fn get(&self, word: &str) -> Option<i8> {
        self.entries.get(word).copied()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the lexicon is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Polarity lexicon: word → positive/negative label
#[derive(Debug, Clone, Default)]
pub struct PolarityLexicon {
    entries: FxHashMap<String, Polarity>,
}

impl PolarityLexicon {
    /// Build from (word, polarity) pairs. Keys are normalized like review text.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Polarity)>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(w, p)| (normalize_key(w.as_ref()), p))
            .collect();
        Self { entries }
    }

    /// Load from a JSON object mapping words to "positive"/"negative".
    pub fn from_json_str(json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        #[serde(rename_all = "snake_case")]
        enum Label {
            Positive,
            Negative,
        }

        let map: FxHashMap<String, Label> = serde_json::from_str(json)?;
        Ok(Self::from_entries(map.into_iter().map(|(w, l)| {
            let polarity = match l {
                Label::Positive => Polarity::Positive,
                Label::Negative => Polarity::Negative,
            };
            (w, polarity)
        })))
    }

    /// Look up a word. Absent entries yield `None`.
    pub fn get(&self, word: &str) -> Option<Polarity> {
        self.entries.get(word).copied()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the lexicon is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_key(word: &str) -> String {
    canonicalize_apostrophes(word).to_lowercase()
}
