//! Feature derivation: document records, tf-idf weighting, and train-only
//! standardization.
//!
//! ## Submodules
//!
//! - [`document`] — annotated token stream to [`crate::types::DocumentRecord`]
//! - [`matrix`] — minimal dense row-major matrix
//! - [`scaler`] — mean/variance standardization fitted on training rows
//! - [`tfidf`] — the fit-once [`Featurizer`] combining vocabulary, idf, and scaler

pub mod document;
pub mod matrix;
pub mod scaler;
pub mod tfidf;

pub use document::build_documents;
pub use matrix::Matrix;
pub use scaler::StandardScaler;
pub use tfidf::Featurizer;
