//! Mean/variance standardization
//!
//! The scaler is fitted once on training rows and then applied unchanged
//! to any other partition. It deliberately has no refit-on-transform path:
//! leaking evaluation statistics into normalization is a structural
//! impossibility, not a discipline.

use crate::errors::{Result, ScorecastError};
use crate::features::matrix::Matrix;

/// Column-wise standardizer: (x - mean) / std, fitted on training data.
///
/// Zero-variance columns pass through centered but unscaled.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl StandardScaler {
    /// Fit column statistics on a training matrix.
    ///
    /// Errors on an empty matrix.
    pub fn fit(x: &Matrix) -> Result<Self> {
        let (n_rows, n_cols) = x.shape();
        if n_rows == 0 {
            return Err(ScorecastError::empty_corpus(
                "cannot fit scaler on zero rows",
            ));
        }

        let mut mean = vec![0.0; n_cols];
        for i in 0..n_rows {
            for (j, m) in mean.iter_mut().enumerate() {
                *m += x.get(i, j);
            }
        }
        for m in &mut mean {
            *m /= n_rows as f64;
        }

        let mut std = vec![0.0; n_cols];
        for i in 0..n_rows {
            for (j, s) in std.iter_mut().enumerate() {
                let d = x.get(i, j) - mean[j];
                *s += d * d;
            }
        }
        for s in &mut std {
            *s = (*s / n_rows as f64).sqrt();
        }

        Ok(Self { mean, std })
    }

    /// Apply the fitted statistics to a matrix of any partition.
    ///
    /// Errors if the column count differs from the fitted one.
    pub fn transform(&self, x: &Matrix) -> Result<Matrix> {
        let (n_rows, n_cols) = x.shape();
        if n_cols != self.mean.len() {
            return Err(ScorecastError::dimension_mismatch(format!(
                "scaler fitted on {} columns, got {}",
                self.mean.len(),
                n_cols
            )));
        }

        let mut out = Matrix::zeros(n_rows, n_cols);
        for i in 0..n_rows {
            for j in 0..n_cols {
                let centered = x.get(i, j) - self.mean[j];
                let value = if self.std[j] > 0.0 {
                    centered / self.std[j]
                } else {
                    centered
                };
                out.set(i, j, value);
            }
        }
        Ok(out)
    }

    /// Fitted column means
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Fitted column standard deviations
    pub fn std(&self) -> &[f64] {
        &self.std
    }
}
