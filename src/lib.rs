//! # scorecast
//!
//! Sentiment feature extraction and sparse linear modeling for video-game
//! review scores.
//!
//! The crate takes a raw scraped review table and produces an interpretable
//! model of the numeric score: deterministic tokenization with
//! negation-aware sentiment annotation from two lexicons, tf-idf features
//! standardized on training data only, a stratified train/test protocol
//! with bootstrap validation, and an L1-penalized regression whose surviving
//! coefficients read directly as signed feature importances.
//!
//! ## Features
//!
//! - **Leak-free**: normalization statistics are fitted per partition and
//!   re-applied, never refitted, on held-out rows
//! - **Deterministic**: seeded splits and resamples reproduce byte-identical
//!   partitions
//! - **Parallel**: the (penalty × resample) search grid runs on Rayon with
//!   no shared mutable state
//! - **Tolerant**: malformed rows drop with counters; degenerate all-zero
//!   models fall back to the training mean

pub mod errors;
pub mod evaluate;
pub mod features;
pub mod ingest;
pub mod metrics;
pub mod model;
pub mod nlp;
pub mod pipeline;
pub mod search;
pub mod split;
pub mod types;

// Re-export commonly used types
pub use errors::{Result, ScorecastError};
pub use types::{
    AnnotatedToken, DocumentRecord, FilterOrder, PipelineConfig, Polarity, RawReview, Review,
    RuntimeOptions,
};

// Re-export main functionality
pub use evaluate::{final_fit, Evaluation, FeatureImportance};
pub use features::{build_documents, Featurizer, Matrix, StandardScaler};
pub use ingest::{clean, IngestReport};
pub use model::Lasso;
pub use nlp::{
    annotator::SentimentAnnotator,
    lexicon::{IntensityLexicon, PolarityLexicon},
    stopwords::{NegationSet, StopwordFilter},
    tokenizer::Tokenizer,
};
pub use pipeline::{PipelineReport, ScorePipeline};
pub use search::{grid_search, PenaltySummary, SearchReport};
pub use split::{bootstrap_resamples, stratified_split, Resample, Split};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
