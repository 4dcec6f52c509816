//! Text processing: tokenization, stop words, lexicons, and sentiment
//! annotation.
//!
//! ## Submodules
//!
//! - [`tokenizer`] — normalization, word splitting, bigram emission
//! - [`stopwords`] — English stop-word list and negation-word set
//! - [`lexicon`] — read-only intensity and polarity lexicons
//! - [`annotator`] — bigram stream to annotated tokens with negation flips

pub mod annotator;
pub mod lexicon;
pub mod stopwords;
pub mod tokenizer;

pub use annotator::SentimentAnnotator;
pub use lexicon::{IntensityLexicon, PolarityLexicon};
pub use stopwords::{NegationSet, StopwordFilter};
pub use tokenizer::Tokenizer;
