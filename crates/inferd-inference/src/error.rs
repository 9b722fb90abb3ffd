//! Error types for the inference service.

use thiserror::Error;

/// A result type using `InferenceError`.
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Errors that can occur while loading a model or running a prediction.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The input does not match the model's expected shape.
    #[error("input has {got} values, model expects {expected}")]
    InputShape {
        /// Number of values the model expects.
        expected: usize,
        /// Number of values the caller supplied.
        got: usize,
    },

    /// The input contains a non-finite value.
    #[error("input contains a non-finite value")]
    NonFiniteInput,

    /// The model file could not be read.
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    /// The model definition could not be parsed.
    #[error("failed to parse model definition: {0}")]
    Parse(#[from] serde_json::Error),

    /// The model definition has no weights.
    #[error("model definition has no weights")]
    EmptyWeights,
}

impl InferenceError {
    /// Whether this error was caused by the caller's input rather than
    /// the model itself.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::InputShape { .. } | Self::NonFiniteInput)
    }
}
