//! Loading of the externally trained model artifacts.
//!
//! The offline trainer exports two JSON files: the fitted vocabulary with its
//! IDF table, and the linear decision function. Nothing outside this module
//! depends on the container format.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use anyhow::{ensure, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::inference::classifier::{Classifier, LinearClassifier};
use crate::inference::vectorizer::{TfidfTransformer, Vectorizer};

/// On-disk form of the fitted vectorizer.
#[derive(Debug, Deserialize)]
pub struct VectorizerArtifact {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
}

/// On-disk form of the trained classifier.
#[derive(Debug, Deserialize)]
pub struct ClassifierArtifact {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

/// The two model collaborators, loaded once at startup and shared read-only
/// across all requests for the process lifetime.
pub struct ModelBundle {
    pub vectorizer: Arc<dyn Vectorizer>,
    pub classifier: Arc<dyn Classifier>,
}

impl std::fmt::Debug for ModelBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBundle").finish_non_exhaustive()
    }
}

impl ModelBundle {
    /// Reads and validates both artifacts. Every error names the offending
    /// file; the caller decides whether a failure is fatal.
    pub fn load(vectorizer_path: &Path, classifier_path: &Path) -> Result<Self> {
        let raw: VectorizerArtifact = read_json(vectorizer_path)?;
        let transformer = TfidfTransformer::new(raw.vocabulary, raw.idf)
            .with_context(|| format!("invalid vectorizer artifact {}", vectorizer_path.display()))?;

        let raw: ClassifierArtifact = read_json(classifier_path)?;
        let classifier = LinearClassifier::new(raw.weights, raw.intercept);
        ensure!(
            classifier.n_features() == transformer.n_features(),
            "classifier artifact {} has {} weights but vectorizer {} produces {} features",
            classifier_path.display(),
            classifier.n_features(),
            vectorizer_path.display(),
            transformer.n_features()
        );

        Ok(Self {
            vectorizer: Arc::new(transformer),
            classifier: Arc::new(classifier),
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("failed to open artifact {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse artifact {}", path.display()))
}
