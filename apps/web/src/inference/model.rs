use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::inference::tfidf::{SparseVector, TfidfVectorizer, VectorizerSpec};
use crate::inference::{Classifier, ModelError, Prediction};

/// On-disk model artifact: a fitted vectorizer and a binary logistic classifier
/// whose positive class is "fake".
#[derive(Debug, Deserialize)]
pub struct ModelArtifact {
    pub vectorizer: VectorizerSpec,
    pub classifier: LogisticSpec,
}

#[derive(Debug, Deserialize)]
pub struct LogisticSpec {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

/// TF-IDF features fed into a logistic regression.
#[derive(Debug)]
pub struct TfidfLogisticModel {
    vectorizer: TfidfVectorizer,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl TfidfLogisticModel {
    /// Reads and validates a JSON artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let model = Self::from_json(&raw)?;
        info!(
            "Loaded classifier from {} ({} features)",
            path.display(),
            model.vectorizer.n_features()
        );
        Ok(model)
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_str(raw)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        let vectorizer = TfidfVectorizer::from_spec(artifact.vectorizer)?;
        let coefficients = artifact.classifier.coefficients;
        if coefficients.len() != vectorizer.n_features() {
            return Err(ModelError::Invalid(format!(
                "classifier has {} coefficients but vectorizer produces {} features",
                coefficients.len(),
                vectorizer.n_features()
            )));
        }

        Ok(Self {
            vectorizer,
            coefficients,
            intercept: artifact.classifier.intercept,
        })
    }

    fn decision_function(&self, x: &SparseVector) -> f64 {
        self.intercept
            + x.iter()
                .map(|&(idx, w)| self.coefficients[idx] * w)
                .sum::<f64>()
    }
}

impl Classifier for TfidfLogisticModel {
    fn predict(&self, text: &str) -> Result<Prediction, ModelError> {
        let x = self.vectorizer.transform(text);
        let z = self.decision_function(&x);
        Ok(Prediction {
            is_fake: z > 0.0,
            fake_probability: sigmoid(z),
        })
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
