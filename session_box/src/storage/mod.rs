mod config;
mod errors;
mod memory;
mod redis;
mod types;

pub use config::{
    SESSION_STORE_PREFIX, SESSION_STORE_TTL, SESSION_STORE_TYPE, SESSION_STORE_URL, store_from_env,
};
pub use errors::StorageError;
pub use types::{InMemorySessionStore, RedisSessionStore, SessionStore};
