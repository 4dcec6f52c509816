//! Core types for scorecast
//!
//! This module defines the fundamental data structures used throughout the
//! library: raw and cleaned review records, sentiment annotations, the
//! per-review document record consumed by the feature builder, and the
//! pipeline configuration.

use crate::errors::{Result, ScorecastError};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Reviews
// ============================================================================

/// A review row as delivered by the crawler, before cleaning.
///
/// `score` and `date` are untrusted: the score may be missing and the date
/// is free text. Rows that cannot be cleaned are dropped (and counted),
/// never propagated as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawReview {
    /// Game title as shown on the review page
    pub game: String,
    /// Review author
    pub author: String,
    /// Full review text
    pub text: String,
    /// Free-text publication date (e.g. "Posted March 3, 2017")
    pub date: String,
    /// Numeric score in 0..=10, absent for unscored reviews
    pub score: Option<f64>,
    /// Source URL — unique identifier for the review
    pub url: String,
}

/// A cleaned review. Immutable once ingested; every downstream stage
/// consumes it read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Game title
    pub game: String,
    /// Review author
    pub author: String,
    /// Full review text, apostrophes canonicalized
    pub text: String,
    /// 4-digit publication year parsed from the free-text date
    pub year: i32,
    /// Numeric score in 0..=10
    pub raw_score: f64,
    /// Source URL — unique identifier
    pub url: String,
}

impl Review {
    /// The model target: the raw score rounded to the nearest integer.
    pub fn rounded_score(&self) -> i32 {
        self.raw_score.round() as i32
    }
}

// ============================================================================
// Sentiment annotation
// ============================================================================

/// Sentiment polarity from the polarity lexicon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// The opposite polarity, used when a negation word precedes the token.
    pub fn flipped(self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }
}

/// A single word surviving tokenization and filtering, with its sentiment
/// annotations already adjusted for negation context.
///
/// Lexicon misses stay `None` — absence of sentiment is information and
/// must not collapse to a neutral zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    /// The surface word (lower-cased, apostrophes canonicalized)
    pub word: String,
    /// Intensity lexicon value in -5..=5, sign-flipped when negated
    pub afinn: Option<i8>,
    /// Polarity lexicon label, swapped when negated
    pub bing: Option<Polarity>,
    /// Whether the preceding word was a negation word
    pub negated: bool,
}

impl AnnotatedToken {
    /// The vocabulary key for this token. Negated tokens carry a prefix so
    /// that "good" and negated "good" are distinct feature dimensions.
    pub fn feature_key(&self, negation_prefix: &str) -> String {
        if self.negated {
            format!("{}{}", negation_prefix, self.word)
        } else {
            self.word.clone()
        }
    }
}

// ============================================================================
// Document record
// ============================================================================

/// One model-ready row: a review collapsed to its rounded score, surviving
/// token count, and token multiset.
///
/// A review whose text filters down to zero tokens is still a valid record
/// (length 0, empty multiset) — length stays usable as a feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Source URL of the review this record was derived from
    pub url: String,
    /// Rounded raw score — the regression target
    pub score: i32,
    /// Count of tokens surviving filtering
    pub length: usize,
    /// Token multiset; negated tokens are stored under their prefixed key
    pub tokens: FxHashMap<String, u32>,
}

impl DocumentRecord {
    /// Total token occurrences (equals `length` by construction).
    pub fn token_total(&self) -> u32 {
        self.tokens.values().sum()
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Order of the URL-dedup stage relative to the content filters during
/// ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOrder {
    /// Deduplicate by URL first, then apply content filters (default:
    /// drop counters then describe unique reviews).
    #[default]
    DedupFirst,
    /// Apply content filters first, then deduplicate survivors.
    FiltersFirst,
}

/// Thread-limit knob for the parallel model search.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RuntimeOptions {
    /// Force single-threaded execution (overrides `max_threads`)
    #[serde(default)]
    pub single_thread: bool,
    /// Cap on worker threads; `None` uses the Rayon default
    #[serde(default)]
    pub max_threads: Option<usize>,
}

impl RuntimeOptions {
    /// Resolve the effective thread count.
    ///
    /// - `single_thread == true` → `Some(1)`
    /// - `max_threads == Some(n)` → `Some(n)`
    /// - otherwise → `None` (use Rayon default)
    pub fn effective_threads(&self) -> Option<usize> {
        if self.single_thread {
            Some(1)
        } else {
            self.max_threads
        }
    }

    /// Execute `f` within a scoped Rayon thread pool matching this config.
    ///
    /// If no thread limit is set, `f` runs directly on the global pool.
    pub fn scoped<R: Send>(&self, f: impl FnOnce() -> R + Send) -> R {
        match self.effective_threads() {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .expect("failed to build Rayon thread pool");
                pool.install(f)
            }
            None => f(),
        }
    }
}

/// Configuration for the end-to-end scoring pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Fraction of documents assigned to the training partition
    pub train_fraction: f64,
    /// Seed for the stratified split and the bootstrap resampler
    pub seed: u64,
    /// Number of bootstrap resamples used for validation
    pub n_resamples: usize,
    /// Grid of L1 penalty strengths to search
    pub penalties: Vec<f64>,
    /// Reviews published before this year are dropped as pre-release noise
    pub min_year: i32,
    /// URL substring marking add-on-content reviews to exclude
    pub addon_url_pattern: String,
    /// Prefix distinguishing negated tokens in the vocabulary
    pub negation_prefix: String,
    /// Order of dedup vs. content filters during ingestion
    #[serde(default)]
    pub filter_order: FilterOrder,
    /// Thread limits for the parallel search
    #[serde(default)]
    pub runtime: RuntimeOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            train_fraction: 0.6,
            seed: 42,
            n_resamples: 25,
            penalties: vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0],
            min_year: 2013,
            addon_url_pattern: "/dlc/".to_string(),
            negation_prefix: "neg_".to_string(),
            filter_order: FilterOrder::DedupFirst,
            runtime: RuntimeOptions::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.train_fraction > 0.0 && self.train_fraction < 1.0) {
            return Err(ScorecastError::invalid_config(format!(
                "train_fraction must be in (0, 1), got {}",
                self.train_fraction
            )));
        }

        if self.n_resamples == 0 {
            return Err(ScorecastError::invalid_config("n_resamples must be > 0"));
        }

        if self.penalties.is_empty() {
            return Err(ScorecastError::invalid_config(
                "penalty grid must not be empty",
            ));
        }

        if self.penalties.iter().any(|&p| !p.is_finite() || p < 0.0) {
            return Err(ScorecastError::invalid_config(
                "penalties must be finite and non-negative",
            ));
        }

        if self.negation_prefix.is_empty() {
            return Err(ScorecastError::invalid_config(
                "negation_prefix must not be empty",
            ));
        }

        Ok(())
    }

    /// Builder method: set train fraction
    pub fn with_train_fraction(mut self, fraction: f64) -> Self {
        self.train_fraction = fraction;
        self
    }

    /// Builder method: set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method: set resample count
    pub fn with_resamples(mut self, n: usize) -> Self {
        self.n_resamples = n;
        self
    }

    /// Builder method: set the penalty grid
    pub fn with_penalties(mut self, penalties: Vec<f64>) -> Self {
        self.penalties = penalties;
        self
    }

    /// Builder method: set the minimum publication year
    pub fn with_min_year(mut self, year: i32) -> Self {
        self.min_year = year;
        self
    }

    /// Builder method: set the filter order
    pub fn with_filter_order(mut self, order: FilterOrder) -> Self {
        self.filter_order = order;
        self
    }

    /// Builder method: set thread limits
    pub fn with_runtime(mut self, runtime: RuntimeOptions) -> Self {
        self.runtime = runtime;
        self
    }
}
