//! Test doubles for session module tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::crypto::{CryptoError, CryptoProvider};
use crate::session::types::{StorageKey, UserId};
use crate::storage::{InMemorySessionStore, SessionStore, StorageError};

/// Random source that always fails.
pub(crate) struct FailingRandom;

impl CryptoProvider for FailingRandom {
    fn fill_random(&self, _dest: &mut [u8]) -> Result<(), CryptoError> {
        Err(CryptoError::RandomSource("random source unavailable".to_string()))
    }
}

/// In-memory store whose operations can be switched to fail.
#[derive(Default)]
pub(crate) struct FailingStore {
    pub(crate) inner: InMemorySessionStore,
    pub(crate) fail_get: AtomicBool,
    pub(crate) fail_set: AtomicBool,
    pub(crate) fail_delete: AtomicBool,
    pub(crate) set_calls: AtomicUsize,
    pub(crate) delete_calls: AtomicUsize,
}

impl FailingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn unavailable(op: &str) -> StorageError {
        StorageError::Storage(format!("{op} failed: connection refused"))
    }
}

#[async_trait]
impl SessionStore for FailingStore {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn get(&self, key: &StorageKey) -> Result<Option<UserId>, StorageError> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(Self::unavailable("get"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &StorageKey, user_id: &UserId) -> Result<(), StorageError> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(Self::unavailable("set"));
        }
        self.inner.set(key, user_id).await
    }

    async fn delete(
        &self,
        key: &StorageKey,
        expected_user_id: &UserId,
    ) -> Result<(), StorageError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::unavailable("delete"));
        }
        self.inner.delete(key, expected_user_id).await
    }
}
