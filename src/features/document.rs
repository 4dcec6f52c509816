//! Annotated token streams to document records
//!
//! Collapses each review's surviving tokens into a [`DocumentRecord`]:
//! the rounded score, the surviving token count, and the token multiset.
//! Negated tokens are stored under a prefixed key so that, for example,
//! "good" and "neg_good" are distinct vocabulary entries.

use crate::nlp::annotator::SentimentAnnotator;
use crate::types::{DocumentRecord, Review};
use rustc_hash::FxHashMap;

/// Build one document record per review.
///
/// Reviews whose text filters down to zero tokens are retained with
/// length 0 and an empty multiset.
pub fn build_documents(
    reviews: &[Review],
    annotator: &SentimentAnnotator,
    negation_prefix: &str,
) -> Vec<DocumentRecord> {
    reviews
        .iter()
        .map(|review| build_document(review, annotator, negation_prefix))
        .collect()
}

fn build_document(
    review: &Review,
    annotator: &SentimentAnnotator,
    negation_prefix: &str,
) -> DocumentRecord {
    let annotated = annotator.annotate(review);
    let mut tokens: FxHashMap<String, u32> = FxHashMap::default();

    for token in &annotated {
        *tokens.entry(token.feature_key(negation_prefix)).or_insert(0) += 1;
    }

    DocumentRecord {
        url: review.url.clone(),
        score: review.rounded_score(),
        length: annotated.len(),
        tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::lexicon::{IntensityLexicon, PolarityLexicon};
    use crate::types::Polarity;

    fn review(text: &str, score: f64) -> Review {
        Review {
            game: "Elsewhere".to_string(),
            author: "reviewer".to_string(),
            text: text.to_string(),
            year: 2019,
            raw_score: score,
            url: format!("https://site/review/{}", text.len()),
        }
    }

    fn annotator() -> SentimentAnnotator {
        let intensity = IntensityLexicon::from_entries([("great", 3)]);
        let polarity = PolarityLexicon::from_entries([("great", Polarity::Positive)]);
        SentimentAnnotator::new(intensity, polarity)
    }

    #[test]
    fn test_length_equals_surviving_tokens() {
        let docs = build_documents(
            &[review("combat feels great, really great stuff", 8.4)],
            &annotator(),
            "neg_",
        );
        let doc = &docs[0];

        assert_eq!(doc.length as u32, doc.token_total());
        assert_eq!(doc.score, 8);
        assert!(doc.tokens["great"] >= 2);
    }

    #[test]
    fn test_negated_token_is_distinct_dimension() {
        let docs = build_documents(
            &[review("combat very great but not great", 6.0)],
            &annotator(),
            "neg_",
        );
        let doc = &docs[0];

        assert_eq!(doc.tokens.get("great"), Some(&1));
        assert_eq!(doc.tokens.get("neg_great"), Some(&1));
    }

    #[test]
    fn test_empty_review_retained() {
        let docs = build_documents(&[review("", 5.0)], &annotator(), "neg_");
        let doc = &docs[0];

        assert_eq!(doc.length, 0);
        assert!(doc.tokens.is_empty());
        assert_eq!(doc.score, 5);
    }

    #[test]
    fn test_one_record_per_review() {
        let reviews = vec![review("a b", 2.0), review("c d e", 9.0)];
        let docs = build_documents(&reviews, &annotator(), "neg_");
        assert_eq!(docs.len(), 2);
    }
}
