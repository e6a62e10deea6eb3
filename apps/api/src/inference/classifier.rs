//! Binary decision over feature vectors.

use anyhow::{ensure, Result};

use crate::inference::vectorizer::SparseVector;

/// Capability contract over the pre-trained decision function.
pub trait Classifier: Send + Sync {
    /// Returns the binary label: 1 = fraudulent posting, 0 = real posting.
    fn predict(&self, features: &SparseVector) -> Result<u8>;
}

/// Linear decision function (dense weights + intercept), as exported by the
/// offline trainer for the linear SVM / logistic family of models.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    weights: Vec<f64>,
    intercept: f64,
}

impl LinearClassifier {
    pub fn new(weights: Vec<f64>, intercept: f64) -> Self {
        Self { weights, intercept }
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    fn decision(&self, features: &SparseVector) -> f64 {
        let dot: f64 = features
            .entries
            .iter()
            .map(|&(col, v)| self.weights[col] * v)
            .sum();
        self.intercept + dot
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &SparseVector) -> Result<u8> {
        ensure!(
            features.dim == self.weights.len(),
            "feature vector has {} columns, classifier expects {}",
            features.dim,
            self.weights.len()
        );
        Ok(if self.decision(features) > 0.0 { 1 } else { 0 })
    }
}
