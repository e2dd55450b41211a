use std::sync::LazyLock;

use async_trait::async_trait;
use redis::{self, AsyncCommands};

use crate::session::{StorageKey, UserId};
use crate::storage::errors::StorageError;

use super::types::{RedisSessionStore, SessionStore, StoredSession};

/// Compare-and-delete: 0 when absent, 1 when removed, -1 when another user
/// owns the entry.
static DELETE_IF_OWNER: LazyLock<redis::Script> = LazyLock::new(|| {
    redis::Script::new(
        r#"
local current = redis.call('GET', KEYS[1])
if not current then
    return 0
end
if cjson.decode(current)['user_id'] ~= ARGV[1] then
    return -1
end
redis.call('DEL', KEYS[1])
return 1
"#,
    )
});

impl RedisSessionStore {
    pub fn new(client: redis::Client, prefix: impl Into<String>, ttl: Option<u64>) -> Self {
        Self {
            client,
            prefix: prefix.into(),
            ttl,
        }
    }

    /// Build a store from a connection URL. No connection is made until
    /// [`SessionStore::init`] or the first command.
    pub fn open(
        url: &str,
        prefix: impl Into<String>,
        ttl: Option<u64>,
    ) -> Result<Self, StorageError> {
        let client = redis::Client::open(url)?;
        Ok(Self::new(client, prefix, ttl))
    }

    fn make_key(&self, key: &StorageKey) -> String {
        format!("{}:{key}", self.prefix)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn init(&self) -> Result<(), StorageError> {
        // Verify the connection works
        let _conn = self.client.get_multiplexed_async_connection().await?;
        Ok(())
    }

    async fn get(&self, key: &StorageKey) -> Result<Option<UserId>, StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let key = self.make_key(key);
        let value: Option<String> = conn.get(&key).await?;

        match value {
            Some(v) => {
                let stored: StoredSession = serde_json::from_str(&v)?;
                Ok(Some(stored.user_id))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &StorageKey, user_id: &UserId) -> Result<(), StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let key = self.make_key(key);
        let value = serde_json::to_string(&StoredSession::new(user_id.clone()))?;
        let _: () = conn.set(&key, value).await?;
        if let Some(ttl) = self.ttl {
            let _: () = conn.expire(&key, ttl as i64).await?;
        }

        Ok(())
    }

    async fn delete(
        &self,
        key: &StorageKey,
        expected_user_id: &UserId,
    ) -> Result<(), StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let key = self.make_key(key);
        let outcome: i64 = DELETE_IF_OWNER
            .key(&key)
            .arg(expected_user_id.as_str())
            .invoke_async(&mut conn)
            .await?;

        if outcome < 0 {
            tracing::warn!("Refusing to delete session entry owned by another user");
            return Err(StorageError::OwnerMismatch);
        }
        Ok(())
    }
}
