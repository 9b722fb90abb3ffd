//! Bundled linear classifier.
//!
//! A small logistic model loaded from a JSON definition file. It stands in
//! for the production model artifact behind the [`InferenceService`]
//! contract; the gateway only ever sees the trait.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{InferenceError, Result};
use crate::{InferenceService, Prediction};

/// One class of the binary model: the label reported to the caller and
/// the suggestion attached to it.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassDefinition {
    /// Label reported in prediction results.
    pub label: String,
    /// Human-readable follow-up suggestion.
    pub suggestion: String,
}

/// On-disk model definition.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelDefinition {
    /// Feature weights; the input must have the same arity.
    pub weights: Vec<f64>,
    /// Bias term.
    #[serde(default)]
    pub bias: f64,
    /// Score at or above which the positive class is reported.
    #[serde(default = "ModelDefinition::default_threshold")]
    pub threshold: f64,
    /// Class reported when the score reaches the threshold.
    pub positive: ClassDefinition,
    /// Class reported otherwise.
    pub negative: ClassDefinition,
}

impl ModelDefinition {
    const fn default_threshold() -> f64 {
        0.5
    }
}

/// A logistic regression model over fixed-arity inputs.
pub struct LinearModel {
    definition: ModelDefinition,
}

impl LinearModel {
    /// Build a model from a parsed definition.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::EmptyWeights`] if the definition has no
    /// weights.
    pub fn new(definition: ModelDefinition) -> Result<Self> {
        if definition.weights.is_empty() {
            return Err(InferenceError::EmptyWeights);
        }
        Ok(Self { definition })
    }

    /// Load a model definition from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or describes
    /// an empty model.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read(path.as_ref())?;
        let definition: ModelDefinition = serde_json::from_slice(&raw)?;
        tracing::info!(
            path = %path.as_ref().display(),
            inputs = definition.weights.len(),
            "Model definition loaded"
        );
        Self::new(definition)
    }

    /// A small built-in model used when no model file is configured.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            definition: ModelDefinition {
                weights: vec![0.9, -0.4, 0.6, 0.2],
                bias: -0.1,
                threshold: 0.5,
                positive: ClassDefinition {
                    label: "positive".to_string(),
                    suggestion: "Consult a specialist for confirmation.".to_string(),
                },
                negative: ClassDefinition {
                    label: "negative".to_string(),
                    suggestion: "No follow-up required.".to_string(),
                },
            },
        }
    }

    /// Number of input values the model expects.
    #[must_use]
    pub fn input_arity(&self) -> usize {
        self.definition.weights.len()
    }

    fn score(&self, input: &[f64]) -> f64 {
        let z: f64 = self
            .definition
            .weights
            .iter()
            .zip(input)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.definition.bias;
        1.0 / (1.0 + (-z).exp())
    }
}

#[async_trait]
impl InferenceService for LinearModel {
    async fn predict(&self, input: &[f64]) -> Result<Prediction> {
        if input.len() != self.definition.weights.len() {
            return Err(InferenceError::InputShape {
                expected: self.definition.weights.len(),
                got: input.len(),
            });
        }
        if input.iter().any(|x| !x.is_finite()) {
            return Err(InferenceError::NonFiniteInput);
        }

        let score = self.score(input);
        let class = if score >= self.definition.threshold {
            &self.definition.positive
        } else {
            &self.definition.negative
        };

        Ok(Prediction {
            label: class.label.clone(),
            score,
            suggestion: class.suggestion.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn predicts_positive_and_negative() {
        let model = LinearModel::builtin();

        let high = model.predict(&[5.0, 0.0, 5.0, 5.0]).await.unwrap();
        assert_eq!(high.label, "positive");
        assert!(high.score >= 0.5);

        let low = model.predict(&[-5.0, 5.0, -5.0, -5.0]).await.unwrap();
        assert_eq!(low.label, "negative");
        assert!(low.score < 0.5);
    }

    #[tokio::test]
    async fn rejects_wrong_arity() {
        let model = LinearModel::builtin();
        let err = model.predict(&[1.0]).await.unwrap_err();
        assert!(matches!(
            err,
            InferenceError::InputShape {
                expected: 4,
                got: 1
            }
        ));
        assert!(err.is_input_error());
    }

    #[tokio::test]
    async fn rejects_non_finite_input() {
        let model = LinearModel::builtin();
        let err = model.predict(&[1.0, f64::NAN, 0.0, 0.0]).await.unwrap_err();
        assert!(matches!(err, InferenceError::NonFiniteInput));
        assert!(err.is_input_error());
    }

    #[test]
    fn loads_definition_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "weights": [1.0, 2.0],
                "bias": 0.5,
                "positive": {{ "label": "yes", "suggestion": "act" }},
                "negative": {{ "label": "no", "suggestion": "wait" }}
            }}"#
        )
        .unwrap();

        let model = LinearModel::load(file.path()).unwrap();
        assert_eq!(model.input_arity(), 2);
    }

    #[test]
    fn rejects_empty_weights() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "weights": [],
                "positive": {{ "label": "yes", "suggestion": "act" }},
                "negative": {{ "label": "no", "suggestion": "wait" }}
            }}"#
        )
        .unwrap();

        assert!(matches!(
            LinearModel::load(file.path()),
            Err(InferenceError::EmptyWeights)
        ));
    }
}
