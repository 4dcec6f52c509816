//! L1-regularized linear regression
//!
//! Coordinate descent with soft-thresholding:
//!
//! ```text
//! minimize ||y - Xβ||² + α||β||₁
//! ```
//!
//! The L1 penalty drives coefficients to exactly zero, which is what makes
//! the fitted model readable as a ranked list of feature importances. At a
//! high enough α every coefficient is zero; the model then predicts the
//! training mean through its intercept, which is a valid (degenerate) fit,
//! not an error.

use crate::errors::{Result, ScorecastError};
use crate::features::matrix::Matrix;
use serde::{Deserialize, Serialize};

/// Lasso regression fitted by coordinate descent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lasso {
    /// Regularization strength
    alpha: f64,
    /// Fitted coefficients (None before fit)
    coefficients: Option<Vec<f64>>,
    /// Intercept term
    intercept: f64,
    /// Maximum coordinate-descent sweeps
    max_iter: usize,
    /// Convergence tolerance on the largest coefficient change per sweep
    tol: f64,
}

impl Lasso {
    /// Create an unfitted model with the given penalty
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            coefficients: None,
            intercept: 0.0,
            max_iter: 1000,
            tol: 1e-6,
        }
    }

    /// Builder method: set the sweep limit
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Builder method: set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// The penalty this model was configured with
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Fitted coefficients; `None` before `fit`
    pub fn coefficients(&self) -> Option<&[f64]> {
        self.coefficients.as_deref()
    }

    /// Fitted intercept
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// True when every coefficient was driven to zero (the model predicts
    /// the training mean).
    pub fn is_degenerate(&self) -> bool {
        self.coefficients
            .as_ref()
            .is_some_and(|c| c.iter().all(|&b| b == 0.0))
    }

    /// Fit on `x` (rows = samples) against targets `y`.
    pub fn fit(&mut self, x: &Matrix, y: &[f64]) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples != y.len() {
            return Err(ScorecastError::dimension_mismatch(format!(
                "{} rows vs {} targets",
                n_samples,
                y.len()
            )));
        }
        if n_samples == 0 {
            return Err(ScorecastError::empty_corpus("cannot fit on zero samples"));
        }

        // Center so the intercept drops out of the descent.
        let mut x_mean = vec![0.0; n_features];
        let mut y_mean = 0.0;
        for i in 0..n_samples {
            for (j, m) in x_mean.iter_mut().enumerate() {
                *m += x.get(i, j);
            }
            y_mean += y[i];
        }
        for m in &mut x_mean {
            *m /= n_samples as f64;
        }
        y_mean /= n_samples as f64;

        let mut beta = vec![0.0; n_features];

        // Column norms of the centered design, precomputed once.
        let mut col_norms_sq = vec![0.0; n_features];
        for (j, norm_sq) in col_norms_sq.iter_mut().enumerate() {
            for i in 0..n_samples {
                let v = x.get(i, j) - x_mean[j];
                *norm_sq += v * v;
            }
        }

        // Residual r = y_centered - X_centered * beta, maintained across
        // coordinate updates so each sweep is O(n * p).
        let mut residual: Vec<f64> = (0..n_samples).map(|i| y[i] - y_mean).collect();

        for _ in 0..self.max_iter {
            let mut max_change = 0.0f64;

            for j in 0..n_features {
                if col_norms_sq[j] < 1e-12 {
                    continue;
                }

                // rho = x_j . (r + x_j * beta_j)
                let mut rho = 0.0;
                for (i, r) in residual.iter().enumerate() {
                    let xij = x.get(i, j) - x_mean[j];
                    rho += xij * (r + xij * beta[j]);
                }

                let old = beta[j];
                beta[j] = soft_threshold(rho, self.alpha) / col_norms_sq[j];

                let delta = beta[j] - old;
                if delta != 0.0 {
                    for (i, r) in residual.iter_mut().enumerate() {
                        *r -= (x.get(i, j) - x_mean[j]) * delta;
                    }
                }

                let change = delta.abs();
                if change > max_change {
                    max_change = change;
                }
            }

            if max_change < self.tol {
                break;
            }
        }

        let mut intercept = y_mean;
        for (j, &b) in beta.iter().enumerate() {
            intercept -= b * x_mean[j];
        }

        self.intercept = intercept;
        self.coefficients = Some(beta);
        Ok(())
    }

    /// Predict targets for `x`.
    ///
    /// Errors if the model is not fitted or the column count differs.
    pub fn predict(&self, x: &Matrix) -> Result<Vec<f64>> {
        let beta = self
            .coefficients
            .as_ref()
            .ok_or_else(|| ScorecastError::internal("predict called before fit"))?;

        let (n_samples, n_features) = x.shape();
        if n_features != beta.len() {
            return Err(ScorecastError::dimension_mismatch(format!(
                "model fitted on {} features, got {}",
                beta.len(),
                n_features
            )));
        }

        Ok((0..n_samples)
            .map(|i| x.row_dot(i, beta) + self.intercept)
            .collect())
    }
}

/// Soft-thresholding operator: sign(z) * max(|z| - threshold, 0)
fn soft_threshold(z: f64, threshold: f64) -> f64 {
    if z > threshold {
        z - threshold
    } else if z < -threshold {
        z + threshold
    } else {
        0.0
    }
}
