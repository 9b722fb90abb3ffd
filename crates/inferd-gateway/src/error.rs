//! Gateway error types and failure classification.
//!
//! Handler outcomes are tagged variants, not inspected at runtime by
//! type: every failing path ends up as a [`Failure`] attached to the
//! response, and the normalizer builds the client-facing envelope from
//! that tag alone. `GateError` itself renders as a bare status; the body
//! is written in one place only.

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use inferd_auth::{AuthError, TokenRejection};
use inferd_inference::InferenceError;
use inferd_store::StoreError;

/// The classification the error normalizer dispatches on.
#[derive(Debug, Clone)]
pub enum Failure {
    /// Client-caused invalid business input. The raiser picks the status.
    Input {
        /// Status chosen by the raising handler.
        status: StatusCode,
        /// Message passed through to the client.
        message: String,
    },
    /// Any other failure: auth rejections, framework errors, internal
    /// faults already reduced to a safe message.
    Framework {
        /// Resolved HTTP status.
        status: StatusCode,
        /// Message passed through to the client.
        message: String,
    },
}

impl Failure {
    /// The HTTP status this failure resolves to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Input { status, .. } | Self::Framework { status, .. } => *status,
        }
    }
}

/// Error type for all gateway handlers and middleware.
#[derive(Debug, Error)]
pub enum GateError {
    /// The caller supplied malformed business input.
    #[error("{message}")]
    Input {
        /// Status chosen by the raiser.
        status: StatusCode,
        /// Client-facing message.
        message: String,
    },

    /// Missing or invalid authentication.
    #[error("{0}")]
    Unauthorized(String),

    /// Storage layer failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Inference service failure.
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// Token issuance or auth configuration failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GateError {
    /// An `Input` failure with the status code the raiser chose.
    #[must_use]
    pub fn input(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Input {
            status,
            message: message.into(),
        }
    }

    /// An unauthorized failure with the given message.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Reduce this error to the classification the normalizer consumes.
    ///
    /// Internal faults are logged here and replaced with a generic
    /// message; native error shapes never reach the wire.
    #[must_use]
    pub fn classify(self) -> Failure {
        match self {
            Self::Input { status, message } => Failure::Input { status, message },
            Self::Unauthorized(message) => Failure::Framework {
                status: StatusCode::UNAUTHORIZED,
                message,
            },
            Self::Inference(err) if err.is_input_error() => Failure::Input {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            Self::Store(StoreError::NotFound) => Failure::Framework {
                status: StatusCode::NOT_FOUND,
                message: "record not found".to_string(),
            },
            Self::Inference(err) => {
                tracing::error!(error = %err, "Inference error");
                Failure::Framework {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "internal server error".to_string(),
                }
            }
            Self::Store(err) => {
                tracing::error!(error = %err, "Store error");
                Failure::Framework {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "internal server error".to_string(),
                }
            }
            Self::Auth(err) => {
                tracing::error!(error = %err, "Token issuance error");
                Failure::Framework {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "internal server error".to_string(),
                }
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                Failure::Framework {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "internal server error".to_string(),
                }
            }
        }
    }
}

impl From<TokenRejection> for GateError {
    fn from(rejection: TokenRejection) -> Self {
        Self::Unauthorized(rejection.to_string())
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let failure = self.classify();
        let mut response = Response::new(Body::empty());
        *response.status_mut() = failure.status();
        response.extensions_mut().insert(failure);
        response
    }
}
