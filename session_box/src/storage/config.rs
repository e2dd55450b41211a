//! Session store selection from the environment

use std::env;
use std::sync::{Arc, LazyLock};

use super::errors::StorageError;
use super::types::{InMemorySessionStore, RedisSessionStore, SessionStore};

/// Store backend, `memory` or `redis`. Default: `memory`.
pub static SESSION_STORE_TYPE: LazyLock<String> =
    LazyLock::new(|| env::var("SESSION_STORE_TYPE").unwrap_or_else(|_| "memory".to_string()));

pub static SESSION_STORE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("SESSION_STORE_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
});

/// Key namespace used by the Redis store. Default: `session`.
pub static SESSION_STORE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("SESSION_STORE_PREFIX").unwrap_or_else(|_| "session".to_string()));

/// Optional expiry in seconds for Redis entries. Unset or invalid means none.
pub static SESSION_STORE_TTL: LazyLock<Option<u64>> =
    LazyLock::new(|| parse_ttl(env::var("SESSION_STORE_TTL").ok()));

fn parse_ttl(value: Option<String>) -> Option<u64> {
    value.and_then(|s| s.parse().ok()).filter(|ttl| *ttl > 0)
}

/// Build the store named by `SESSION_STORE_TYPE`.
pub fn store_from_env() -> Result<Arc<dyn SessionStore>, StorageError> {
    build_store(
        SESSION_STORE_TYPE.as_str(),
        SESSION_STORE_URL.as_str(),
        SESSION_STORE_PREFIX.as_str(),
        *SESSION_STORE_TTL,
    )
}

fn build_store(
    store_type: &str,
    url: &str,
    prefix: &str,
    ttl: Option<u64>,
) -> Result<Arc<dyn SessionStore>, StorageError> {
    tracing::info!("Initializing session store with type: {}", store_type);

    let store: Arc<dyn SessionStore> = match store_type {
        "memory" => Arc::new(InMemorySessionStore::new()),
        "redis" => Arc::new(RedisSessionStore::open(url, prefix, ttl).inspect_err(|e| {
            tracing::error!("Failed to create Redis client: {}", e);
        })?),
        t => {
            return Err(StorageError::Storage(format!(
                "Unsupported session store type: {t}. Supported types are 'memory' and 'redis'"
            )));
        }
    };

    Ok(store)
}
