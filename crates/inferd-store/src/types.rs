//! Records persisted by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use inferd_core::{Identity, PredictionId};

/// A registered user, keyed by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// The identity embedded in issued tokens.
    pub identity: Identity,
    /// Per-user random salt for the password digest.
    pub salt: String,
    /// Hex-encoded blake3 digest of salt followed by password.
    pub password_hash: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Create a record for a new user, hashing the supplied password.
    #[must_use]
    pub fn new(identity: Identity, password: &str) -> Self {
        let salt = Uuid::new_v4().to_string();
        let password_hash = Self::digest(&salt, password);
        Self {
            identity,
            salt,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// Check a presented password against the stored digest.
    #[must_use]
    pub fn verify_password(&self, password: &str) -> bool {
        Self::digest(&self.salt, password) == self.password_hash
    }

    fn digest(salt: &str, password: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        hasher.finalize().to_hex().to_string()
    }
}

/// One stored prediction, scoped to the user who requested it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Unique record identifier.
    pub id: PredictionId,
    /// Owner user id (`Identity::id`).
    pub user_id: String,
    /// Predicted class label.
    pub label: String,
    /// Model confidence in `[0, 1]`.
    pub score: f64,
    /// Follow-up suggestion attached to the predicted class.
    pub suggestion: String,
    /// When the prediction was made.
    pub created_at: DateTime<Utc>,
}
