//! Inference service contract for inferd.
//!
//! The gateway consumes predictions through the [`InferenceService`]
//! trait; the model behind it is an opaque collaborator loaded once at
//! startup and treated as read-only for the life of the process. A
//! bundled [`LinearModel`] implementation is provided for deployments
//! without a dedicated model artifact and for tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod model;

pub use error::{InferenceError, Result};
pub use model::{ClassDefinition, LinearModel, ModelDefinition};

use async_trait::async_trait;
use serde::Serialize;

/// The outcome of one prediction.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// Predicted class label.
    pub label: String,
    /// Model confidence in `[0, 1]`.
    pub score: f64,
    /// Follow-up suggestion attached to the predicted class.
    pub suggestion: String,
}

/// The contract the gateway holds against the model.
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Run a prediction over one input vector.
    ///
    /// # Errors
    ///
    /// Returns an error when the input does not fit the model
    /// ([`InferenceError::is_input_error`] is `true` for those) or when
    /// the model itself fails.
    async fn predict(&self, input: &[f64]) -> Result<Prediction>;
}
