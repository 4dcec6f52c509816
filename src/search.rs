//! Penalty grid search over bootstrap resamples
//!
//! Each resample fits a featurizer on its in-bag rows only (normalization
//! statistics come from the resample, never from the whole training set),
//! then fits one lasso per penalty against the shared design matrix and
//! scores the out-of-bag fold. Resamples run in parallel under rayon;
//! a final sequential reduction averages the fold statistics per penalty.

use crate::errors::{Result, ScorecastError};
use crate::features::Featurizer;
use crate::metrics::{mae, mae_rounded};
use crate::model::Lasso;
use crate::split::Resample;
use crate::types::{DocumentRecord, RuntimeOptions};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Aggregated validation statistics for one penalty value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltySummary {
    /// The L1 penalty strength
    pub penalty: f64,
    /// Mean out-of-bag MAE of raw predictions across folds
    pub mean_mae: f64,
    /// Mean out-of-bag MAE of rounded predictions across folds
    pub mean_mae_rounded: f64,
    /// Number of folds that contributed (resamples with an empty
    /// out-of-bag set are skipped)
    pub folds: usize,
}

/// Outcome of the grid search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    /// One summary per penalty, in grid order
    pub summaries: Vec<PenaltySummary>,
    /// The selected penalty
    pub selected_penalty: f64,
    /// Validation error (mean rounded MAE) at the selected penalty
    pub selected_error: f64,
}

/// Per-fold statistics for one grid cell
struct FoldStats {
    penalty_idx: usize,
    mae: f64,
    mae_rounded: f64,
}

/// Run the grid search.
///
/// Selection minimizes the mean rounded-prediction MAE; ties go to the
/// lower penalty. A penalty that drives every coefficient to zero still
/// produces folds (the model predicts the in-bag mean) and is aggregated
/// normally.
pub fn grid_search(
    train: &[DocumentRecord],
    penalties: &[f64],
    resamples: &[Resample],
    runtime: &RuntimeOptions,
) -> Result<SearchReport> {
    if train.is_empty() {
        return Err(ScorecastError::empty_corpus("cannot search on zero rows"));
    }
    if penalties.is_empty() {
        return Err(ScorecastError::invalid_config("penalty grid is empty"));
    }
    if resamples.is_empty() {
        return Err(ScorecastError::invalid_config("no resamples provided"));
    }

    let fold_results: Result<Vec<Vec<FoldStats>>> = runtime.scoped(|| {
        resamples
            .par_iter()
            .map(|resample| evaluate_resample(train, penalties, resample))
            .collect()
    });

    let mut sums = vec![(0.0f64, 0.0f64, 0usize); penalties.len()];
    for stats in fold_results?.into_iter().flatten() {
        let entry = &mut sums[stats.penalty_idx];
        entry.0 += stats.mae;
        entry.1 += stats.mae_rounded;
        entry.2 += 1;
    }

    let summaries: Vec<PenaltySummary> = penalties
        .iter()
        .zip(&sums)
        .map(|(&penalty, &(mae_sum, round_sum, folds))| PenaltySummary {
            penalty,
            mean_mae: if folds > 0 { mae_sum / folds as f64 } else { f64::INFINITY },
            mean_mae_rounded: if folds > 0 {
                round_sum / folds as f64
            } else {
                f64::INFINITY
            },
            folds,
        })
        .collect();

    if summaries.iter().all(|s| s.folds == 0) {
        return Err(ScorecastError::internal(
            "every resample had an empty out-of-bag fold",
        ));
    }

    // Minimal mean rounded MAE; ties (within epsilon) go to the lower
    // penalty regardless of grid order.
    const TIE_EPSILON: f64 = 1e-12;
    let mut best = &summaries[0];
    for summary in &summaries[1..] {
        let diff = summary.mean_mae_rounded - best.mean_mae_rounded;
        if diff < -TIE_EPSILON || (diff.abs() <= TIE_EPSILON && summary.penalty < best.penalty) {
            best = summary;
        }
    }

    Ok(SearchReport {
        selected_penalty: best.penalty,
        selected_error: best.mean_mae_rounded,
        summaries,
    })
}

/// Fit one resample's featurizer and score every penalty on its
/// out-of-bag fold. The featurizer and design matrices are built once
/// per resample and shared across penalties.
///
/// Returns no statistics when the resample has no out-of-bag rows to
/// validate on.
fn evaluate_resample(
    train: &[DocumentRecord],
    penalties: &[f64],
    resample: &Resample,
) -> Result<Vec<FoldStats>> {
    if resample.out_of_bag.is_empty() {
        return Ok(Vec::new());
    }

    let in_bag: Vec<DocumentRecord> = resample.in_bag.iter().map(|&i| train[i].clone()).collect();
    let out_of_bag: Vec<DocumentRecord> = resample
        .out_of_bag
        .iter()
        .map(|&i| train[i].clone())
        .collect();

    // Normalization statistics come from the in-bag rows only.
    let featurizer = Featurizer::fit(&in_bag)?;
    let x_in = featurizer.transform(&in_bag)?;
    let y_in = Featurizer::targets(&in_bag);
    let x_out = featurizer.transform(&out_of_bag)?;
    let y_out = Featurizer::targets(&out_of_bag);

    let mut stats = Vec::with_capacity(penalties.len());
    for (penalty_idx, &penalty) in penalties.iter().enumerate() {
        let mut model = Lasso::new(penalty);
        model.fit(&x_in, &y_in)?;
        let preds = model.predict(&x_out)?;
        stats.push(FoldStats {
            penalty_idx,
            mae: mae(&preds, &y_out),
            mae_rounded: mae_rounded(&preds, &y_out),
        });
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::bootstrap_resamples;
    use rustc_hash::FxHashMap;

    /// Training rows whose single token tracks the score.
    fn synthetic_train(n: usize) -> Vec<DocumentRecord> {
        (0..n)
            .map(|i| {
                let score = 2 + (i % 8) as i32;
                let mut tokens = FxHashMap::default();
                let word = if score <= 5 { "dull" } else { "great" };
                tokens.insert(word.to_string(), 1 + (score.unsigned_abs() / 3));
                tokens.insert(format!("filler{}", i % 4), 1);
                let length = tokens.values().sum::<u32>() as usize;
                DocumentRecord {
                    url: format!("https://site/review/{i}"),
                    score,
                    length,
                    tokens,
                }
            })
            .collect()
    }

    #[test]
    fn test_search_selects_a_grid_penalty() {
        let train = synthetic_train(24);
        let resamples = bootstrap_resamples(train.len(), 8, 42).unwrap();
        let penalties = vec![0.01, 0.1, 10.0];

        let report =
            grid_search(&train, &penalties, &resamples, &RuntimeOptions::default()).unwrap();

        assert!(penalties.contains(&report.selected_penalty));
        assert_eq!(report.summaries.len(), 3);
        for summary in &report.summaries {
            assert!(summary.folds > 0);
            assert!(summary.mean_mae.is_finite());
        }
    }

    #[test]
    fn test_huge_penalty_degenerates_but_completes() {
        let train = synthetic_train(16);
        let resamples = bootstrap_resamples(train.len(), 4, 7).unwrap();

        // All-zero models predict the in-bag mean; the search still
        // produces finite statistics for that penalty.
        let report =
            grid_search(&train, &[1e9], &resamples, &RuntimeOptions::default()).unwrap();
        assert!(report.summaries[0].mean_mae_rounded.is_finite());
    }

    #[test]
    fn test_tie_breaks_to_lower_penalty() {
        let train = synthetic_train(16);
        let resamples = bootstrap_resamples(train.len(), 4, 7).unwrap();

        // Two absurdly large penalties produce identical degenerate
        // models; the lower one must win even listed second.
        let report =
            grid_search(&train, &[2e9, 1e9], &resamples, &RuntimeOptions::default()).unwrap();
        assert_eq!(report.selected_penalty, 1e9);
    }

    #[test]
    fn test_search_deterministic() {
        let train = synthetic_train(20);
        let resamples = bootstrap_resamples(train.len(), 6, 11).unwrap();
        let penalties = vec![0.01, 0.1];

        let a = grid_search(&train, &penalties, &resamples, &RuntimeOptions::default()).unwrap();
        let b = grid_search(&train, &penalties, &resamples, &RuntimeOptions::default()).unwrap();
        assert_eq!(a.selected_penalty, b.selected_penalty);
        assert_eq!(a.selected_error, b.selected_error);
    }

    #[test]
    fn test_fold_counts_match_across_penalties() {
        let train = synthetic_train(20);
        let resamples = bootstrap_resamples(train.len(), 6, 3).unwrap();
        let penalties = vec![0.01, 0.1, 1.0];

        let report =
            grid_search(&train, &penalties, &resamples, &RuntimeOptions::default()).unwrap();

        // Every penalty is scored against the same out-of-bag folds.
        let folds = report.summaries[0].folds;
        assert!(folds > 0);
        assert!(report.summaries.iter().all(|s| s.folds == folds));
    }

    #[test]
    fn test_single_thread_runtime() {
        let train = synthetic_train(12);
        let resamples = bootstrap_resamples(train.len(), 3, 5).unwrap();
        let runtime = RuntimeOptions {
            single_thread: true,
            max_threads: None,
        };
        let report = grid_search(&train, &[0.1], &resamples, &runtime).unwrap();
        assert_eq!(report.selected_penalty, 0.1);
    }

    #[test]
    fn test_bad_inputs() {
        let train = synthetic_train(8);
        let resamples = bootstrap_resamples(train.len(), 2, 1).unwrap();
        let rt = RuntimeOptions::default();

        assert!(grid_search(&[], &[0.1], &resamples, &rt).is_err());
        assert!(grid_search(&train, &[], &resamples, &rt).is_err());
        assert!(grid_search(&train, &[0.1], &[], &rt).is_err());
    }
}
