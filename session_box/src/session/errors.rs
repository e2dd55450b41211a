use thiserror::Error;

use crate::crypto::CryptoError;
use crate::storage::StorageError;

/// Runtime failure of a lifecycle operation, reported through its future.
///
/// An unknown or expired token is not an error: it yields a fresh guest
/// session instead.
#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

/// Programming error detected before any asynchronous work starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("Session was issued by a different session box")]
    ForeignSession,
}
