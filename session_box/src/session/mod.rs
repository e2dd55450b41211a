mod config;
mod errors;
mod main;
mod types;

pub use config::{CSRF_BYTES, CSRF_LENGTH, STORAGE_KEY_BYTES, USER_TOKEN_BYTES, USER_TOKEN_LENGTH};
pub use errors::{SessionError, UsageError};
pub use main::SessionBox;
pub use types::{Session, SessionKind, StorageKey, Token, TokenClass, UserId};
