//! The clean → vectorize → predict pipeline.

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::inference::classifier::Classifier;
use crate::inference::normalizer::TextNormalizer;
use crate::inference::vectorizer::Vectorizer;

/// Human-readable outcome of a prediction.
///
/// Label 1 maps to `Fraudulent` and label 0 to `Real` everywhere a verdict
/// is produced; this is the only mapping path in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Real,
    Fraudulent,
}

impl Verdict {
    pub fn from_label(label: u8) -> Self {
        if label == 0 {
            Verdict::Real
        } else {
            Verdict::Fraudulent
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Real => "REAL",
            Verdict::Fraudulent => "FRAUDULENT",
        })
    }
}

/// Result of a single inference call.
#[derive(Debug, Clone)]
pub struct Inference {
    pub label: u8,
    pub verdict: Verdict,
    pub canonical_text: String,
}

/// Orchestrates the normalizer and the two model collaborators.
///
/// The collaborators are trait objects so tests can substitute fakes for the
/// loaded artifacts. Inference is synchronous and CPU-only; the service is
/// shared read-only across requests and never mutated after startup.
pub struct InferenceService {
    normalizer: TextNormalizer,
    vectorizer: Arc<dyn Vectorizer>,
    classifier: Arc<dyn Classifier>,
}

impl InferenceService {
    pub fn new(
        normalizer: TextNormalizer,
        vectorizer: Arc<dyn Vectorizer>,
        classifier: Arc<dyn Classifier>,
    ) -> Self {
        Self {
            normalizer,
            vectorizer,
            classifier,
        }
    }

    /// Runs the full pipeline over one raw posting.
    pub fn infer(&self, raw: &str) -> Result<Inference> {
        let canonical_text = self.normalizer.normalize(raw);
        let features = self
            .vectorizer
            .transform(&canonical_text)
            .context("vectorizer transform failed")?;
        let label = self
            .classifier
            .predict(&features)
            .context("classifier predict failed")?;
        Ok(Inference {
            label,
            verdict: Verdict::from_label(label),
            canonical_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::vectorizer::SparseVector;

    /// Counts whitespace tokens into a single feature column.
    struct TokenCountVectorizer;

    impl Vectorizer for TokenCountVectorizer {
        fn transform(&self, text: &str) -> Result<SparseVector> {
            let count = text.split_whitespace().count() as f64;
            Ok(SparseVector {
                dim: 1,
                entries: vec![(0, count)],
            })
        }

        fn n_features(&self) -> usize {
            1
        }
    }

    struct FixedLabel(u8);

    impl Classifier for FixedLabel {
        fn predict(&self, _features: &SparseVector) -> Result<u8> {
            Ok(self.0)
        }
    }

    struct FailingVectorizer;

    impl Vectorizer for FailingVectorizer {
        fn transform(&self, _text: &str) -> Result<SparseVector> {
            anyhow::bail!("corrupt vocabulary state")
        }

        fn n_features(&self) -> usize {
            0
        }
    }

    fn service_with_label(label: u8) -> InferenceService {
        InferenceService::new(
            TextNormalizer::default(),
            Arc::new(TokenCountVectorizer),
            Arc::new(FixedLabel(label)),
        )
    }

    #[test]
    fn test_label_one_maps_to_fraudulent() {
        let out = service_with_label(1).infer("some posting").unwrap();
        assert_eq!(out.label, 1);
        assert_eq!(out.verdict, Verdict::Fraudulent);
    }

    #[test]
    fn test_label_zero_maps_to_real() {
        let out = service_with_label(0).infer("some posting").unwrap();
        assert_eq!(out.label, 0);
        assert_eq!(out.verdict, Verdict::Real);
    }

    #[test]
    fn test_infer_is_deterministic() {
        let service = service_with_label(1);
        let raw = "Earn $5000 per week working from home! http://spam.example";
        let first = service.infer(raw).unwrap();
        for _ in 0..5 {
            let again = service.infer(raw).unwrap();
            assert_eq!(again.label, first.label);
            assert_eq!(again.verdict, first.verdict);
            assert_eq!(again.canonical_text, first.canonical_text);
        }
    }

    #[test]
    fn test_canonical_text_is_normalized_input() {
        let out = service_with_label(0).infer("  Hello,   WORLD!  ").unwrap();
        assert_eq!(out.canonical_text, "hello world");
    }

    #[test]
    fn test_empty_input_is_classified_not_rejected() {
        let out = service_with_label(0).infer("").unwrap();
        assert_eq!(out.canonical_text, "");
        assert_eq!(out.verdict, Verdict::Real);
    }

    #[test]
    fn test_vectorizer_failure_propagates_with_context() {
        let service = InferenceService::new(
            TextNormalizer::default(),
            Arc::new(FailingVectorizer),
            Arc::new(FixedLabel(0)),
        );
        let err = service.infer("anything").unwrap_err();
        assert!(format!("{err:#}").contains("vectorizer transform failed"));
    }

    #[test]
    fn test_verdict_wire_form() {
        assert_eq!(serde_json::to_string(&Verdict::Real).unwrap(), "\"REAL\"");
        assert_eq!(
            serde_json::to_string(&Verdict::Fraudulent).unwrap(),
            "\"FRAUDULENT\""
        );
    }

    #[test]
    fn test_verdict_from_label_round_trip() {
        assert_eq!(Verdict::from_label(0), Verdict::Real);
        assert_eq!(Verdict::from_label(1), Verdict::Fraudulent);
    }
}
