use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::session::{StorageKey, UserId};
use crate::storage::errors::StorageError;

use super::types::{InMemorySessionStore, SessionStore};

impl InMemorySessionStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory session store");
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of user sessions currently stored.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(()) // Nothing to initialize for in-memory store
    }

    async fn get(&self, key: &StorageKey) -> Result<Option<UserId>, StorageError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &StorageKey, user_id: &UserId) -> Result<(), StorageError> {
        self.entries.lock().await.insert(*key, user_id.clone());
        Ok(())
    }

    async fn delete(
        &self,
        key: &StorageKey,
        expected_user_id: &UserId,
    ) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().await;
        match entries.get(key).map(|owner| owner == expected_user_id) {
            None => Ok(()),
            Some(true) => {
                entries.remove(key);
                Ok(())
            }
            Some(false) => {
                tracing::warn!("Refusing to delete session entry owned by another user");
                Err(StorageError::OwnerMismatch)
            }
        }
    }
}
