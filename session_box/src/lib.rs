//! session_box - Guest and user session tokens for web applications
//!
//! This crate issues, validates and rotates opaque session tokens. A token is
//! either a self-contained guest token, which doubles as its own CSRF value, or
//! a user token whose one-way storage key maps to a user identity in an
//! injected [`SessionStore`]. The CSRF value of a user session is a keyed
//! derivation of the token, so it can be handed to pages without exposing the
//! session token itself.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use session_box::{InMemorySessionStore, SessionBox, UserId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sessions = SessionBox::new(Arc::new(InMemorySessionStore::new()));
//!
//! // No cookie yet: a fresh guest session is issued.
//! let guest = sessions.get(None).await?;
//! let cookie = guest.new_token().map(|t| t.as_str().to_string());
//!
//! // Login: the guest session is promoted to a user session with a new token.
//! let user = sessions.update(&guest, Some(UserId::from("42")))?.await?;
//! assert_eq!(user.user_id().map(UserId::as_str), Some("42"));
//! # let _ = cookie;
//! # Ok(())
//! # }
//! ```

mod crypto;
mod session;
mod storage;

#[cfg(test)]
mod test_utils;

pub use crypto::{
    CSRF_LABEL, CryptoError, CryptoProvider, KeyDerivation, RingCryptoProvider,
    SeededCryptoProvider, encode,
};

pub use session::{
    CSRF_BYTES, CSRF_LENGTH, STORAGE_KEY_BYTES, Session, SessionBox, SessionError, SessionKind,
    StorageKey, Token, TokenClass, USER_TOKEN_BYTES, USER_TOKEN_LENGTH, UsageError, UserId,
};

pub use storage::{
    InMemorySessionStore, RedisSessionStore, SESSION_STORE_PREFIX, SESSION_STORE_TTL,
    SESSION_STORE_TYPE, SESSION_STORE_URL, SessionStore, StorageError, store_from_env,
};
