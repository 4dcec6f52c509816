//! Error types for scorecast
//!
//! This module defines the error types used throughout the library.
//! Only caller mistakes surface as errors; per-row data problems
//! (missing scores, lexicon misses, empty documents) are recovered
//! in-band and counted in the stage reports instead.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ScorecastError>;

/// Main error type for scorecast
#[derive(Error, Debug, Clone)]
pub enum ScorecastError {
    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A fit was requested on an empty partition
    #[error("Empty corpus: {message}")]
    EmptyCorpus { message: String },

    /// Matrix / vector dimensions do not line up
    #[error("Dimension mismatch: {message}")]
    DimensionMismatch { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Internal error (should not occur in normal usage)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ScorecastError {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an empty corpus error
    pub fn empty_corpus(message: impl Into<String>) -> Self {
        Self::EmptyCorpus {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(message: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ScorecastError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
