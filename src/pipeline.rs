//! End-to-end pipeline orchestration
//!
//! [`ScorePipeline`] owns the configuration and the read-only language
//! resources, and threads the stage artifacts through in order: cleaning →
//! annotation → document records → stratified split → bootstrap search →
//! final fit. Each stage consumes its predecessor's output read-only; the
//! result is one serializable [`PipelineReport`].

use crate::errors::{Result, ScorecastError};
use crate::evaluate::{final_fit, Evaluation};
use crate::features::build_documents;
use crate::ingest::{clean, IngestReport};
use crate::nlp::annotator::SentimentAnnotator;
use crate::nlp::lexicon::{IntensityLexicon, PolarityLexicon};
use crate::search::{grid_search, SearchReport};
use crate::split::{bootstrap_resamples, stratified_split};
use crate::types::{DocumentRecord, PipelineConfig, RawReview};
use serde::{Deserialize, Serialize};

/// Everything the caller needs from one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Ingestion drop counters
    pub ingest: IngestReport,
    /// Documents surviving cleaning
    pub documents: usize,
    /// Training / test partition sizes
    pub train_size: usize,
    pub test_size: usize,
    /// Grid-search summaries and the selected penalty
    pub search: SearchReport,
    /// Test-set evaluation of the final model
    pub evaluation: Evaluation,
}

/// The end-to-end scoring pipeline
#[derive(Debug, Clone)]
pub struct ScorePipeline {
    config: PipelineConfig,
    annotator: SentimentAnnotator,
}

impl ScorePipeline {
    /// Create a pipeline over the given lexicons with default stop-word
    /// and negation sets.
    ///
    /// Errors if the configuration fails validation.
    pub fn new(
        config: PipelineConfig,
        intensity: IntensityLexicon,
        polarity: PolarityLexicon,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            annotator: SentimentAnnotator::new(intensity, polarity),
            config,
        })
    }

    /// Replace the annotator (custom stop-word or negation sets)
    pub fn with_annotator(mut self, annotator: SentimentAnnotator) -> Self {
        self.annotator = annotator;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline over a raw review table.
    pub fn run(&self, raw: Vec<RawReview>) -> Result<PipelineReport> {
        let (reviews, ingest) = clean(raw, &self.config);
        if reviews.len() < 2 {
            return Err(ScorecastError::empty_corpus(format!(
                "need at least 2 cleaned reviews to split, got {}",
                reviews.len()
            )));
        }

        let documents = build_documents(&reviews, &self.annotator, &self.config.negation_prefix);
        self.run_on_documents(documents, ingest)
    }

    /// Run the modeling stages on pre-built document records.
    ///
    /// Useful for fixtures and for callers that annotate out-of-band.
    pub fn run_on_documents(
        &self,
        documents: Vec<DocumentRecord>,
        ingest: IngestReport,
    ) -> Result<PipelineReport> {
        let split = stratified_split(&documents, self.config.train_fraction, self.config.seed)?;

        let train: Vec<DocumentRecord> =
            split.train.iter().map(|&i| documents[i].clone()).collect();
        let test: Vec<DocumentRecord> = split.test.iter().map(|&i| documents[i].clone()).collect();

        let resamples =
            bootstrap_resamples(train.len(), self.config.n_resamples, self.config.seed)?;
        let search = grid_search(
            &train,
            &self.config.penalties,
            &resamples,
            &self.config.runtime,
        )?;

        let evaluation = final_fit(&train, &test, search.selected_penalty)?;

        Ok(PipelineReport {
            ingest,
            documents: documents.len(),
            train_size: train.len(),
            test_size: test.len(),
            search,
            evaluation,
        })
    }
}
