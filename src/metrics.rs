//! Error metrics
//!
//! The selection metric is the rounding-aware MAE: predictions are rounded
//! to the nearest integer before the absolute error, matching how scores
//! are actually published. The raw MAE is reported alongside it.

use std::collections::BTreeMap;

/// Mean absolute error of raw predictions.
///
/// Returns 0.0 for empty inputs.
pub fn mae(predictions: &[f64], truths: &[f64]) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    let sum: f64 = predictions
        .iter()
        .zip(truths)
        .map(|(p, t)| (p - t).abs())
        .sum();
    sum / predictions.len() as f64
}

/// Mean absolute error after rounding predictions to the nearest integer:
/// `mean(|round(p) - t|)`.
pub fn mae_rounded(predictions: &[f64], truths: &[f64]) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    let sum: f64 = predictions
        .iter()
        .zip(truths)
        .map(|(p, t)| (p.round() - t).abs())
        .sum();
    sum / predictions.len() as f64
}

/// Distribution of `|round(p) - round(t)|` as (deviation, count) pairs in
/// ascending deviation order.
pub fn deviation_histogram(predictions: &[f64], truths: &[f64]) -> Vec<(u32, usize)> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for (p, t) in predictions.iter().zip(truths) {
        let deviation = (p.round() - t.round()).abs() as u32;
        *counts.entry(deviation).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}
