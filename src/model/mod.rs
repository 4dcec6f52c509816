//! Sparse linear modeling.
//!
//! ## Submodules
//!
//! - [`lasso`] — L1-regularized linear regression via coordinate descent

pub mod lasso;

pub use lasso::Lasso;
