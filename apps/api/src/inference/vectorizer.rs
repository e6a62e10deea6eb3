//! Term-weight vectorization over canonical text.
//!
//! Transform-only: the vocabulary and IDF table are fitted by the offline
//! trainer and loaded as an artifact. There is no fit path in this crate.

use std::collections::HashMap;

use anyhow::{ensure, Result};

/// Sparse feature vector over the fixed vocabulary.
///
/// `entries` holds `(column, value)` pairs sorted by column; `dim` is the full
/// vocabulary dimensionality, so an empty document is `dim` columns of zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    pub dim: usize,
    pub entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }
}

/// Capability contract over the pre-fit term-weighting artifact.
pub trait Vectorizer: Send + Sync {
    /// Maps canonical text to a feature vector. An empty document is valid
    /// input and yields an all-zero vector, never an error.
    fn transform(&self, text: &str) -> Result<SparseVector>;

    /// Fixed dimensionality of the loaded vocabulary.
    fn n_features(&self) -> usize;
}

/// TF-IDF transform backed by a fitted vocabulary and IDF table.
///
/// Matches the offline trainer: whitespace tokens are counted, in-vocabulary
/// counts are weighted by the per-term IDF, and the result is L2-normalized.
/// Out-of-vocabulary terms contribute nothing.
#[derive(Debug, Clone)]
pub struct TfidfTransformer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfTransformer {
    /// Builds the transformer, validating that every vocabulary entry maps to
    /// a distinct in-range IDF column.
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Result<Self> {
        let dim = idf.len();
        let mut seen = vec![false; dim];
        for (term, &col) in &vocabulary {
            ensure!(
                col < dim,
                "vocabulary term '{term}' maps to column {col}, out of range for {dim} IDF weights"
            );
            ensure!(!seen[col], "vocabulary column {col} is assigned to more than one term");
            seen[col] = true;
        }
        Ok(Self { vocabulary, idf })
    }
}

impl Vectorizer for TfidfTransformer {
    fn transform(&self, text: &str) -> Result<SparseVector> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in text.split_whitespace() {
            if let Some(&col) = self.vocabulary.get(token) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        if counts.is_empty() {
            return Ok(SparseVector::zeros(self.idf.len()));
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, tf)| (col, tf * self.idf[col]))
            .collect();
        entries.sort_unstable_by_key(|&(col, _)| col);

        let norm = entries.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in entries.iter_mut() {
                *v /= norm;
            }
        }

        Ok(SparseVector {
            dim: self.idf.len(),
            entries,
        })
    }

    fn n_features(&self) -> usize {
        self.idf.len()
    }
}
