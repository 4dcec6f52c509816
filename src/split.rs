//! Stratified train/test split and bootstrap resampling
//!
//! Both operations are seeded and deterministic: the same seed over the
//! same input ordering reproduces identical partitions, which the test
//! fixtures rely on.

use crate::errors::{Result, ScorecastError};
use crate::types::DocumentRecord;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

/// Index partition produced by the stratified split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    /// Indices of training rows
    pub train: Vec<usize>,
    /// Indices of test rows
    pub test: Vec<usize>,
}

/// One bootstrap resample of the training partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resample {
    /// Sampled-with-replacement positions into the training partition
    /// (same size as the training partition, duplicates expected)
    pub in_bag: Vec<usize>,
    /// Training positions never drawn — the validation fold
    pub out_of_bag: Vec<usize>,
}

/// Stratified random split by rounded score.
///
/// Documents are grouped by score, each stratum is shuffled with the
/// seeded RNG, and per-stratum train counts are allocated by largest
/// remainder so the global train fraction is honored within rounding
/// while every stratum stays represented proportionally.
pub fn stratified_split(
    docs: &[DocumentRecord],
    train_fraction: f64,
    seed: u64,
) -> Result<Split> {
    if docs.len() < 2 {
        return Err(ScorecastError::empty_corpus(format!(
            "need at least 2 documents to split, got {}",
            docs.len()
        )));
    }
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(ScorecastError::invalid_config(format!(
            "train_fraction must be in (0, 1), got {train_fraction}"
        )));
    }

    // BTreeMap: stratum iteration order is score order, not hash order.
    let mut strata: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (i, doc) in docs.iter().enumerate() {
        strata.entry(doc.score).or_default().push(i);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    for indices in strata.values_mut() {
        indices.shuffle(&mut rng);
    }

    let n_total = docs.len();
    let n_train = (train_fraction * n_total as f64).round() as usize;
    let n_train = n_train.clamp(1, n_total - 1);

    // Largest-remainder allocation of train slots across strata.
    let mut floors: BTreeMap<i32, usize> = BTreeMap::new();
    let mut remainders: Vec<(i32, f64)> = Vec::new();
    let mut allocated = 0;
    for (&score, indices) in &strata {
        let exact = train_fraction * indices.len() as f64;
        let floor = (exact.floor() as usize).min(indices.len());
        floors.insert(score, floor);
        allocated += floor;
        remainders.push((score, exact - exact.floor()));
    }

    // Hand out the remaining slots to the largest fractional remainders;
    // ties resolve by score for determinism.
    remainders.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    let mut remaining = n_train.saturating_sub(allocated);
    for (score, _) in &remainders {
        if remaining == 0 {
            break;
        }
        let take = floors.get_mut(score).expect("stratum present");
        if *take < strata[score].len() {
            *take += 1;
            remaining -= 1;
        }
    }

    let mut train = Vec::with_capacity(n_train);
    let mut test = Vec::with_capacity(n_total - n_train);
    for (score, indices) in &strata {
        let take = floors[score];
        train.extend_from_slice(&indices[..take]);
        test.extend_from_slice(&indices[take..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok(Split { train, test })
}

/// Generate `k` bootstrap resamples over a training partition of
/// `train_len` rows.
///
/// Each resample draws `train_len` positions with replacement; positions
/// never drawn form the out-of-bag validation fold. Per-resample RNG
/// streams derive deterministically from the base seed.
pub fn bootstrap_resamples(train_len: usize, k: usize, seed: u64) -> Result<Vec<Resample>> {
    if train_len == 0 {
        return Err(ScorecastError::empty_corpus(
            "cannot resample an empty training partition",
        ));
    }

    let mut resamples = Vec::with_capacity(k);
    for r in 0..k {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(r as u64).wrapping_mul(0x9E37_79B9));
        let mut drawn = vec![false; train_len];
        let mut in_bag = Vec::with_capacity(train_len);

        for _ in 0..train_len {
            let pos = rng.gen_range(0..train_len);
            drawn[pos] = true;
            in_bag.push(pos);
        }

        let out_of_bag: Vec<usize> = (0..train_len).filter(|&p| !drawn[p]).collect();
        resamples.push(Resample { in_bag, out_of_bag });
    }

    Ok(resamples)
}
