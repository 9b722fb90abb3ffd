//! Token validation and issuance.
//!
//! The validator is a pure function over (token, current time, secret):
//! signature and claim checks never perform I/O, and the clock is passed
//! in explicitly so behavior is deterministic under test.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use inferd_core::{Credentials, Identity};

use crate::error::{AuthError, Result, TokenRejection};
use crate::AuthConfig;

/// Claims carried in an inferd bearer token.
///
/// `aud`, `iss`, and `sub` are intentionally absent: this is a
/// single-tenant deployment and those claims are neither issued nor
/// checked.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// The caller identity. Absence makes the token invalid regardless
    /// of signature correctness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<Identity>,
    /// Issued-at, seconds since the epoch.
    iat: i64,
    /// Not-before, seconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nbf: Option<i64>,
    /// Expiry, seconds since the epoch.
    exp: i64,
}

/// Validates presented bearer tokens against the configured secret.
pub struct TokenValidator {
    key: DecodingKey,
    max_age_seconds: i64,
}

impl TokenValidator {
    /// Build a validator from the authentication configuration.
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            max_age_seconds: config.max_age_seconds,
        }
    }

    /// Validate a token at the given instant.
    ///
    /// Checks, in order: HS256 signature, `exp` not passed, `nbf` reached,
    /// token age since `iat` within the maximum, and a non-empty `user`
    /// claim. Temporal claims are checked manually against `now` with zero
    /// leeway.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenRejection`] describing the first failed check. An
    /// invalid token is an ordinary outcome here, not an exceptional one.
    pub fn validate(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> std::result::Result<Credentials, TokenRejection> {
        // Temporal claims are verified below against the caller's clock,
        // so the library's own exp/nbf handling is switched off.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        let data = decode::<Claims>(token, &self.key, &validation).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenRejection::BadSignature,
            _ => TokenRejection::Malformed,
        })?;
        let claims = data.claims;

        let ts = now.timestamp();
        if claims.exp <= ts {
            return Err(TokenRejection::Expired);
        }
        if claims.nbf.is_some_and(|nbf| nbf > ts) {
            return Err(TokenRejection::NotYetValid);
        }
        if ts - claims.iat > self.max_age_seconds {
            return Err(TokenRejection::TooOld);
        }

        match claims.user {
            Some(user) if !user.is_empty() => Ok(Credentials::new(user)),
            _ => Err(TokenRejection::MissingUser),
        }
    }
}

/// Mints tokens for the authentication routes.
///
/// Issued payloads carry exactly the shape [`TokenValidator`] expects:
/// a `user` claim plus `iat`, `nbf`, and `exp`.
pub struct TokenIssuer {
    key: EncodingKey,
    ttl_seconds: i64,
}

impl TokenIssuer {
    /// Build an issuer from the authentication configuration.
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            key: EncodingKey::from_secret(config.secret.as_bytes()),
            ttl_seconds: config.token_ttl_seconds,
        }
    }

    /// Issue a token for `user`, valid from `now` for the configured ttl.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn issue(&self, user: &Identity, now: DateTime<Utc>) -> Result<String> {
        let ts = now.timestamp();
        let claims = Claims {
            user: Some(user.clone()),
            iat: ts,
            nbf: Some(ts),
            exp: ts + self.ttl_seconds,
        };

        encode(&Header::default(), &claims, &self.key).map_err(AuthError::from)
    }
}
