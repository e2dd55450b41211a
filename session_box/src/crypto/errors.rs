use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The secure random source failed. There is no weaker fallback.
    #[error("Random source error: {0}")]
    RandomSource(String),

    #[error("HMAC error: {0}")]
    Hmac(String),
}
