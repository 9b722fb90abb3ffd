//! Record store for inferd.
//!
//! This crate holds the registered-user directory consumed by the login
//! routes and the per-user prediction history consumed by the history and
//! search routes. The [`Store`] trait is the contract; the bundled
//! [`MemoryStore`] keeps everything in process memory.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;
pub mod types;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use types::{PredictionRecord, UserRecord};

/// The storage contract the gateway holds against its record store.
pub trait Store: Send + Sync {
    /// Insert a new user record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if a user with the same email
    /// already exists, or a backend error.
    fn put_user(&self, record: &UserRecord) -> Result<()>;

    /// Look up a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend operation fails.
    fn user_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    /// Append a prediction to its owner's history.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend operation fails.
    fn put_prediction(&self, record: &PredictionRecord) -> Result<()>;

    /// All predictions for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend operation fails.
    fn predictions_for_user(&self, user_id: &str) -> Result<Vec<PredictionRecord>>;
}
