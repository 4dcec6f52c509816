//! Bigram stream to annotated tokens
//!
//! The annotator turns each review into a stream of [`AnnotatedToken`]s:
//! bigrams are emitted over the normalized word stream, `word_2` of each
//! bigram is looked up in both lexicons, and a negation word in `word_1`
//! position flips the annotations. Stop words and title-derived words are
//! then filtered out, and the bigram structure collapses to single tokens.
//!
//! Negation context is read before stop-word filtering: "not" is itself a
//! stop word, but it still negates its successor.

use crate::nlp::lexicon::{IntensityLexicon, PolarityLexicon};
use crate::nlp::stopwords::{NegationSet, StopwordFilter};
use crate::nlp::tokenizer::Tokenizer;
use crate::types::{AnnotatedToken, Review};
use rustc_hash::FxHashSet;

/// Annotates review text with sentiment, negation, and filtering applied.
///
/// All referenced tables are read-only; one annotator may be shared across
/// parallel workers.
#[derive(Debug, Clone)]
pub struct SentimentAnnotator {
    tokenizer: Tokenizer,
    stopwords: StopwordFilter,
    negations: NegationSet,
    intensity: IntensityLexicon,
    polarity: PolarityLexicon,
}

impl SentimentAnnotator {
    /// Create an annotator over the given lexicons with the built-in
    /// stop-word and negation sets.
    pub fn new(intensity: IntensityLexicon, polarity: PolarityLexicon) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            stopwords: StopwordFilter::new(),
            negations: NegationSet::new(),
            intensity,
            polarity,
        }
    }

    /// Replace the stop-word filter
    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Replace the negation set
    pub fn with_negations(mut self, negations: NegationSet) -> Self {
        self.negations = negations;
        self
    }

    /// Annotate one review.
    ///
    /// Returns the surviving tokens in text order. A review whose text
    /// filters down to nothing returns an empty stream — the caller keeps
    /// the review (length 0), it is never dropped here.
    pub fn annotate(&self, review: &Review) -> Vec<AnnotatedToken> {
        let title_stops = self.title_stoplist(&review.game);
        let mut out = Vec::new();

        for bigram in self.tokenizer.bigrams(&review.text) {
            let word = bigram.word_2;

            if self.stopwords.is_stopword(&word) || title_stops.contains(word.as_str()) {
                continue;
            }

            let negated = self.negations.is_negation(&bigram.word_1);
            let afinn = self
                .intensity
                .get(&word)
                .map(|v| if negated { -v } else { v });
            let bing = self
                .polarity
                .get(&word)
                .map(|p| if negated { p.flipped() } else { p });

            out.push(AnnotatedToken {
                word,
                afinn,
                bing,
                negated,
            });
        }

        out
    }

    /// Build the per-review title stop-list: title words minus stop words
    /// and purely numeric tokens, plus a possessive variant of each.
    fn title_stoplist(&self, title: &str) -> FxHashSet<String> {
        let mut stops = FxHashSet::default();
        for word in self.tokenizer.words(title) {
            if self.stopwords.is_stopword(&word) || Tokenizer::is_numeric(&word) {
                continue;
            }
            stops.insert(format!("{word}'s"));
            stops.insert(word);
        }
        stops
    }
}
