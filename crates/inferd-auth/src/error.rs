//! Authentication error types.

use thiserror::Error;

/// A result type using `AuthError`.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors from token issuance or authentication configuration.
///
/// These are the truly exceptional conditions; an invalid presented token
/// is not an `AuthError` but an ordinary [`TokenRejection`] outcome.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No signing secret was configured.
    #[error("signing secret is missing or empty")]
    MissingSecret,

    /// Encoding a token failed.
    #[error("token encoding failed: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// The reason a presented token was rejected.
///
/// Every variant maps to the same client-visible outcome (401); the
/// validator returns this as a normal result rather than panicking or
/// surfacing an internal error, so the caller can produce a uniform
/// unauthorized response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenRejection {
    /// The token could not be decoded at all.
    #[error("malformed token")]
    Malformed,

    /// The signature does not verify against the configured secret.
    #[error("invalid token signature")]
    BadSignature,

    /// The `exp` claim has passed.
    #[error("token expired")]
    Expired,

    /// The `nbf` claim has not been reached yet.
    #[error("token not yet valid")]
    NotYetValid,

    /// The token is older than the configured maximum age.
    #[error("token exceeds maximum age")]
    TooOld,

    /// The payload has no usable `user` claim.
    #[error("token payload has no user")]
    MissingUser,
}
