//! The fit-once featurizer: vocabulary, idf, and standardization
//!
//! A [`Featurizer`] is fitted on exactly one set of documents (a training
//! partition or a bootstrap in-bag sample) and then applied, unchanged, to
//! any partition. It owns:
//!
//! - the training vocabulary, sorted for deterministic column order;
//! - per-term idf = ln(n_docs / df) computed on the fitted corpus;
//! - a [`StandardScaler`] fitted on the resulting training matrix.
//!
//! Tokens unseen at fit time are silently weight-0 at transform time;
//! empty documents produce an all-zero tf-idf row with `length` 0.

use crate::errors::Result;
use crate::features::matrix::Matrix;
use crate::features::scaler::StandardScaler;
use crate::types::DocumentRecord;
use rustc_hash::FxHashMap;

/// Fitted feature transformer: documents → standardized tf-idf + length rows.
#[derive(Debug, Clone)]
pub struct Featurizer {
    /// Sorted training vocabulary; column j of the raw matrix is vocab[j]
    vocab: Vec<String>,
    /// Token → column index
    index: FxHashMap<String, usize>,
    /// idf per vocabulary term
    idf: Vec<f64>,
    /// Scaler fitted on the training matrix (last column is `length`)
    scaler: StandardScaler,
}

impl Featurizer {
    /// Fit vocabulary, idf, and scaler on a training partition.
    ///
    /// Errors on an empty partition — every other degenerate input
    /// (empty documents, singleton vocabulary) is handled in-band.
    pub fn fit(docs: &[DocumentRecord]) -> Result<Self> {
        if docs.is_empty() {
            return Err(crate::errors::ScorecastError::empty_corpus(
                "cannot fit featurizer on zero documents",
            ));
        }

        // Document frequency per term.
        let mut df: FxHashMap<&str, usize> = FxHashMap::default();
        for doc in docs {
            for token in doc.tokens.keys() {
                *df.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        // Sorted vocabulary: column order is independent of hash iteration.
        let mut vocab: Vec<String> = df.keys().map(|s| s.to_string()).collect();
        vocab.sort_unstable();

        let n_docs = docs.len() as f64;
        let idf: Vec<f64> = vocab
            .iter()
            .map(|term| (n_docs / df[term.as_str()] as f64).ln())
            .collect();

        let index: FxHashMap<String, usize> = vocab
            .iter()
            .enumerate()
            .map(|(j, term)| (term.clone(), j))
            .collect();

        let raw = raw_matrix(docs, &index, &idf);
        let scaler = StandardScaler::fit(&raw)?;

        Ok(Self {
            vocab,
            index,
            idf,
            scaler,
        })
    }

    /// Transform documents from any partition into the fitted feature space.
    pub fn transform(&self, docs: &[DocumentRecord]) -> Result<Matrix> {
        let raw = raw_matrix(docs, &self.index, &self.idf);
        self.scaler.transform(&raw)
    }

    /// Regression targets aligned with the transformed rows.
    pub fn targets(docs: &[DocumentRecord]) -> Vec<f64> {
        docs.iter().map(|d| d.score as f64).collect()
    }

    /// Feature names in column order: vocabulary terms, then `length`.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = self.vocab.clone();
        names.push("length".to_string());
        names
    }

    /// Number of feature columns (vocabulary + length)
    pub fn n_features(&self) -> usize {
        self.vocab.len() + 1
    }

    /// Unscaled tf-idf value of one term in one document; 0 for unseen
    /// terms, empty documents, and absent tokens.
    pub fn tfidf(&self, doc: &DocumentRecord, term: &str) -> f64 {
        let Some(&j) = self.index.get(term) else {
            return 0.0;
        };
        if doc.length == 0 {
            return 0.0;
        }
        let count = doc.tokens.get(term).copied().unwrap_or(0);
        let tf = count as f64 / doc.length as f64;
        tf * self.idf[j]
    }
}

/// Raw (unscaled) tf-idf + length matrix for a fitted vocabulary.
fn raw_matrix(docs: &[DocumentRecord], index: &FxHashMap<String, usize>, idf: &[f64]) -> Matrix {
    let n_cols = idf.len() + 1;
    let mut out = Matrix::zeros(docs.len(), n_cols);

    for (i, doc) in docs.iter().enumerate() {
        if doc.length > 0 {
            let total = doc.length as f64;
            for (token, &count) in &doc.tokens {
                // Evaluation-only tokens are not in the index: weight 0.
                if let Some(&j) = index.get(token) {
                    let tf = count as f64 / total;
                    out.set(i, j, tf * idf[j]);
                }
            }
        }
        out.set(i, n_cols - 1, doc.length as f64);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(url: &str, score: i32, tokens: &[(&str, u32)]) -> DocumentRecord {
        let map: FxHashMap<String, u32> = tokens
            .iter()
            .map(|(t, c)| (t.to_string(), *c))
            .collect();
        let length = map.values().sum::<u32>() as usize;
        DocumentRecord {
            url: url.to_string(),
            score,
            length,
            tokens: map,
        }
    }

    #[test]
    fn test_vocabulary_sorted_and_length_last() {
        let docs = vec![
            doc("a", 8, &[("zesty", 1), ("apt", 1)]),
            doc("b", 4, &[("mid", 1)]),
        ];
        let featurizer = Featurizer::fit(&docs).unwrap();
        assert_eq!(featurizer.feature_names(), vec!["apt", "mid", "zesty", "length"]);
    }

    #[test]
    fn test_tfidf_zero_for_absent_token() {
        let docs = vec![
            doc("a", 8, &[("great", 1)]),
            doc("b", 4, &[("awful", 1)]),
        ];
        let featurizer = Featurizer::fit(&docs).unwrap();
        assert_eq!(featurizer.tfidf(&docs[0], "awful"), 0.0);
        assert!(featurizer.tfidf(&docs[0], "great") > 0.0);
    }

    #[test]
    fn test_singleton_term_gets_max_idf() {
        // 3 docs, "rare" in exactly one: idf = ln(3/1).
        let docs = vec![
            doc("a", 8, &[("common", 1), ("rare", 1)]),
            doc("b", 4, &[("common", 1)]),
            doc("c", 6, &[("common", 1)]),
        ];
        let featurizer = Featurizer::fit(&docs).unwrap();

        let rare = featurizer.tfidf(&docs[0], "rare");
        // tf = 1/2, idf = ln(3)
        assert!((rare - 0.5 * 3.0_f64.ln()).abs() < 1e-12);

        // A term in every doc has idf ln(1) = 0.
        assert_eq!(featurizer.tfidf(&docs[1], "common"), 0.0);
    }

    #[test]
    fn test_unseen_token_is_zero_not_error() {
        let train = vec![doc("a", 8, &[("great", 1)]), doc("b", 4, &[("dull", 1)])];
        let featurizer = Featurizer::fit(&train).unwrap();

        let eval = vec![doc("c", 7, &[("unheard", 2), ("great", 1)])];
        let transformed = featurizer.transform(&eval).unwrap();
        assert_eq!(transformed.ncols(), featurizer.n_features());
    }

    #[test]
    fn test_empty_document_transforms() {
        let train = vec![doc("a", 8, &[("great", 1)]), doc("b", 4, &[("dull", 1)])];
        let featurizer = Featurizer::fit(&train).unwrap();

        let eval = vec![doc("c", 5, &[])];
        let transformed = featurizer.transform(&eval).unwrap();
        assert_eq!(transformed.nrows(), 1);
    }

    #[test]
    fn test_fit_on_empty_partition_is_error() {
        assert!(Featurizer::fit(&[]).is_err());
    }

    #[test]
    fn test_targets_are_rounded_scores() {
        let docs = vec![doc("a", 8, &[("great", 1)]), doc("b", 4, &[("dull", 1)])];
        assert_eq!(Featurizer::targets(&docs), vec![8.0, 4.0]);
    }

    #[test]
    fn test_length_column_populated() {
        let docs = vec![
            doc("a", 8, &[("great", 2), ("fun", 1)]),
            doc("b", 4, &[("dull", 1)]),
        ];
        let featurizer = Featurizer::fit(&docs).unwrap();

        // Reconstruct raw length from the standardized value.
        let z = featurizer.transform(&docs).unwrap();
        let j = featurizer.n_features() - 1;
        let mean = featurizer.scaler.mean()[j];
        let std = featurizer.scaler.std()[j];
        assert!((z.get(0, j) * std + mean - 3.0).abs() < 1e-12);
        assert!((z.get(1, j) * std + mean - 1.0).abs() < 1e-12);
    }
}
