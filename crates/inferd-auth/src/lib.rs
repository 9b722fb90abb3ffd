//! Bearer-token authentication for inferd.
//!
//! This crate provides the credential gate for the inference API:
//!
//! - HS256 signature verification against a configured secret
//! - Temporal claim checks (`exp`, `nbf`, maximum age since `iat`)
//! - Extraction of the embedded `user` identity into [`inferd_core::Credentials`]
//! - Token issuance for the login route
//!
//! Validation is pure over (token, current time, secret); an invalid
//! token is reported as an ordinary [`TokenRejection`] outcome so the
//! gateway can produce a uniform 401 without special-casing.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use inferd_auth::{AuthConfig, TokenIssuer, TokenValidator};
//! use inferd_core::Identity;
//!
//! let config = AuthConfig::new("super-secret".to_string()).unwrap();
//! let issuer = TokenIssuer::new(&config);
//! let validator = TokenValidator::new(&config);
//!
//! let now = Utc::now();
//! let token = issuer.issue(&Identity::new("u-1", "user@example.com"), now).unwrap();
//! let credentials = validator.validate(&token, now).unwrap();
//! assert_eq!(credentials.user.id, "u-1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod token;

pub use error::{AuthError, Result, TokenRejection};
pub use token::{TokenIssuer, TokenValidator};

/// Default maximum accepted token age since issuance, in seconds.
pub const DEFAULT_MAX_AGE_SECONDS: i64 = 14_400;

/// Configuration for token validation and issuance.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// The HS256 signing secret. Never empty.
    pub secret: String,
    /// Maximum accepted token age since `iat`, in seconds.
    pub max_age_seconds: i64,
    /// Lifetime of newly issued tokens, in seconds.
    pub token_ttl_seconds: i64,
}

impl AuthConfig {
    /// Create a configuration with the default age window and ttl.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingSecret`] if the secret is empty. Without
    /// key material the validator could never soundly accept a token, so
    /// this aborts startup instead of being handled per request.
    pub fn new(secret: String) -> Result<Self> {
        if secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }
        Ok(Self {
            secret,
            max_age_seconds: DEFAULT_MAX_AGE_SECONDS,
            token_ttl_seconds: DEFAULT_MAX_AGE_SECONDS,
        })
    }
}
