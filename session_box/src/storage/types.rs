use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::session::{StorageKey, UserId};
use crate::storage::errors::StorageError;

/// Map from storage key to user identity, backing user sessions.
///
/// Implementations may be remote; every call is a potential suspension point
/// and transport timeouts are theirs to impose. Guest sessions never touch
/// the store.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Initialize the store. Called once before the store is put to use.
    async fn init(&self) -> Result<(), StorageError>;

    /// Look up the user a storage key belongs to.
    async fn get(&self, key: &StorageKey) -> Result<Option<UserId>, StorageError>;

    /// Record `key -> user_id`.
    async fn set(&self, key: &StorageKey, user_id: &UserId) -> Result<(), StorageError>;

    /// Remove `key`. Succeeds when the key is absent. When present, the entry
    /// must belong to `expected_user_id`; otherwise [`StorageError::OwnerMismatch`]
    /// is returned and the entry is left alone.
    async fn delete(
        &self,
        key: &StorageKey,
        expected_user_id: &UserId,
    ) -> Result<(), StorageError>;
}

pub struct InMemorySessionStore {
    pub(super) entries: Mutex<HashMap<StorageKey, UserId>>,
}

pub struct RedisSessionStore {
    pub(super) client: redis::Client,
    pub(super) prefix: String,
    pub(super) ttl: Option<u64>,
}

/// Record kept per user session in Redis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct StoredSession {
    pub(super) user_id: UserId,
    pub(super) created_at: DateTime<Utc>,
}

impl StoredSession {
    pub(super) fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            created_at: Utc::now(),
        }
    }
}
