//! Inference adapter: input validation, the pluggable `Classifier` seam and
//! the mapping from a raw prediction to the label and confidence users see.
//!
//! `AppState` holds an `Arc<dyn Classifier>`; the default backend is
//! `TfidfLogisticModel`, loaded once at startup from a JSON artifact.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

pub mod model;
pub mod tfidf;
pub mod validation;

pub use model::TfidfLogisticModel;
pub use validation::validate_description;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid token pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

/// Raw classifier output for one document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub is_fake: bool,
    /// Positive-class ("fake") probability in [0, 1].
    pub fake_probability: f64,
}

/// Implement this to swap inference backends without touching the handlers.
/// Calls are CPU-bound; callers run them on the blocking pool.
pub trait Classifier: Send + Sync {
    fn predict(&self, text: &str) -> Result<Prediction, ModelError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Label {
    #[serde(rename = "Fake Job")]
    Fake,
    #[serde(rename = "Real Job")]
    Real,
}

impl Label {
    /// The literal persisted in `predictions.prediction`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Fake => "Fake Job",
            Label::Real => "Real Job",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label plus confidence (percent, 2 decimals) for the predicted class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verdict {
    pub label: Label,
    pub confidence: f64,
}

impl From<Prediction> for Verdict {
    fn from(p: Prediction) -> Self {
        let probability = p.fake_probability.clamp(0.0, 1.0);
        if p.is_fake {
            Verdict {
                label: Label::Fake,
                confidence: round2(probability * 100.0),
            }
        } else {
            Verdict {
                label: Label::Real,
                confidence: round2((1.0 - probability) * 100.0),
            }
        }
    }
}

/// Rounds to 2 decimals from the exact binary value, so `1.115` (stored as
/// 1.11499...) becomes 1.11 rather than 1.12.
pub(crate) fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Runs `classifier` on the blocking pool and maps the result to a verdict.
pub async fn classify(
    classifier: Arc<dyn Classifier>,
    text: String,
) -> Result<Verdict, crate::errors::AppError> {
    let prediction = tokio::task::spawn_blocking(move || classifier.predict(&text))
        .await
        .map_err(|e| anyhow::anyhow!("inference task failed: {e}"))??;
    Ok(Verdict::from(prediction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_confidence_is_probability_percent() {
        let v = Verdict::from(Prediction {
            is_fake: true,
            fake_probability: 0.87654,
        });
        assert_eq!(v.label, Label::Fake);
        assert_eq!(v.confidence, 87.65);
    }

    #[test]
    fn test_real_confidence_is_complement_percent() {
        let v = Verdict::from(Prediction {
            is_fake: false,
            fake_probability: 0.1234,
        });
        assert_eq!(v.label, Label::Real);
        assert_eq!(v.confidence, 87.66);
    }

    #[test]
    fn test_confidence_bounded_0_to_100() {
        for p in [0.0, 1e-9, 0.5, 0.999_999, 1.0] {
            for is_fake in [true, false] {
                let v = Verdict::from(Prediction {
                    is_fake,
                    fake_probability: p,
                });
                assert!((0.0..=100.0).contains(&v.confidence), "{v:?}");
            }
        }
    }

    #[test]
    fn test_round2_uses_exact_binary_value() {
        assert_eq!(round2(1.115), 1.11);
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(87.654), 87.65);
        assert_eq!(round2(99.999), 100.0);
    }

    #[test]
    fn test_fake_confidence_near_half_cent_tie() {
        let v = Verdict::from(Prediction {
            is_fake: true,
            fake_probability: 1.115 / 100.0,
        });
        assert_eq!(v.confidence, 1.11);
    }

    #[test]
    fn test_label_literals() {
        assert_eq!(Label::Fake.as_str(), "Fake Job");
        assert_eq!(Label::Real.to_string(), "Real Job");
        assert_eq!(serde_json::to_string(&Label::Fake).unwrap(), "\"Fake Job\"");
    }

    struct Fixed(Prediction);

    impl Classifier for Fixed {
        fn predict(&self, _text: &str) -> Result<Prediction, ModelError> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn test_classify_runs_backend() {
        let classifier: Arc<dyn Classifier> = Arc::new(Fixed(Prediction {
            is_fake: true,
            fake_probability: 0.75,
        }));
        let verdict = classify(classifier, "anything".to_string()).await.unwrap();
        assert_eq!(
            verdict,
            Verdict {
                label: Label::Fake,
                confidence: 75.0
            }
        );
    }
}
