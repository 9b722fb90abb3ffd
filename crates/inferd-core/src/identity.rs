//! Caller identity as carried in the `user` claim of a bearer token.

use serde::{Deserialize, Serialize};

/// The identity embedded in a token's `user` claim.
///
/// This is the shape the authentication routes put into tokens and the
/// shape the validator extracts back out. A token whose `user` claim is
/// absent or has an empty `id` is never treated as valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user identifier.
    pub id: String,
    /// User's email address.
    pub email: String,
    /// Display name, if one was registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Identity {
    /// Create a new identity.
    #[must_use]
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: None,
        }
    }

    /// Whether this identity carries no usable user id.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// Server-side credentials derived from a valid token.
///
/// Constructed per request during the authentication phase and discarded
/// when the request completes; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// The authenticated caller.
    pub user: Identity,
}

impl Credentials {
    /// Wrap an identity in request credentials.
    #[must_use]
    pub const fn new(user: Identity) -> Self {
        Self { user }
    }
}
