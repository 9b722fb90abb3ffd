//! In-memory store implementation.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{Result, StoreError};
use crate::types::{PredictionRecord, UserRecord};
use crate::Store;

/// An in-memory [`Store`] backed by `RwLock`-guarded maps.
///
/// Users are keyed by email, prediction history by owner user id. State
/// lives for the life of the process; a persistent backend implements
/// the same trait without the gateway changing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, UserRecord>>,
    predictions: RwLock<HashMap<String, Vec<PredictionRecord>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn put_user(&self, record: &UserRecord) -> Result<()> {
        let mut users = self.users.write();
        if users.contains_key(&record.identity.email) {
            return Err(StoreError::Conflict(record.identity.email.clone()));
        }
        users.insert(record.identity.email.clone(), record.clone());
        Ok(())
    }

    fn user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.read().get(email).cloned())
    }

    fn put_prediction(&self, record: &PredictionRecord) -> Result<()> {
        self.predictions
            .write()
            .entry(record.user_id.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    fn predictions_for_user(&self, user_id: &str) -> Result<Vec<PredictionRecord>> {
        let mut records = self
            .predictions
            .read()
            .get(user_id)
            .cloned()
            .unwrap_or_default();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
