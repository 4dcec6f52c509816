//! Final refit and test-set evaluation
//!
//! The model is refitted once at the selected penalty on the full training
//! partition (normalization statistics computed once, from training data)
//! and scored against the untouched test partition. Because features are
//! standardized to a common scale, the fitted coefficients read directly
//! as signed importances.

use crate::errors::Result;
use crate::features::Featurizer;
use crate::metrics::{deviation_histogram, mae, mae_rounded};
use crate::model::Lasso;
use crate::types::DocumentRecord;
use serde::{Deserialize, Serialize};

/// One feature's signed importance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    /// Feature name (vocabulary term or `length`)
    pub feature: String,
    /// The fitted coefficient; sign is direction, magnitude is strength
    pub weight: f64,
}

/// Test-set evaluation of the final model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// MAE of raw test predictions
    pub test_mae: f64,
    /// MAE of rounded test predictions
    pub test_mae_rounded: f64,
    /// Distribution of |round(prediction) - truth| as (deviation, count)
    pub deviation_counts: Vec<(u32, usize)>,
    /// Nonzero coefficients ranked by |weight| descending. Empty when the
    /// penalty drove every coefficient to zero (sparsity is expected).
    pub importances: Vec<FeatureImportance>,
    /// Fitted intercept
    pub intercept: f64,
    /// Whether all coefficients were driven to zero
    pub degenerate: bool,
}

/// Refit at the selected penalty and evaluate on the test partition.
pub fn final_fit(
    train: &[DocumentRecord],
    test: &[DocumentRecord],
    penalty: f64,
) -> Result<Evaluation> {
    let featurizer = Featurizer::fit(train)?;
    let x_train = featurizer.transform(train)?;
    let y_train = Featurizer::targets(train);

    let mut model = Lasso::new(penalty);
    model.fit(&x_train, &y_train)?;

    let x_test = featurizer.transform(test)?;
    let y_test = Featurizer::targets(test);
    let preds = model.predict(&x_test)?;

    Ok(Evaluation {
        test_mae: mae(&preds, &y_test),
        test_mae_rounded: mae_rounded(&preds, &y_test),
        deviation_counts: deviation_histogram(&preds, &y_test),
        importances: rank_importances(&featurizer, &model),
        intercept: model.intercept(),
        degenerate: model.is_degenerate(),
    })
}

/// Rank nonzero coefficients by |weight| descending; equal magnitudes
/// order by feature name for a stable ranking.
fn rank_importances(featurizer: &Featurizer, model: &Lasso) -> Vec<FeatureImportance> {
    let names = featurizer.feature_names();
    let Some(coefficients) = model.coefficients() else {
        return Vec::new();
    };

    let mut ranked: Vec<FeatureImportance> = names
        .into_iter()
        .zip(coefficients)
        .filter(|(_, &w)| w != 0.0)
        .map(|(feature, &weight)| FeatureImportance { feature, weight })
        .collect();

    ranked.sort_by(|a, b| {
        b.weight
            .abs()
            .partial_cmp(&a.weight.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.feature.cmp(&b.feature))
    });
    ranked
}
