//! Storage key and CSRF derivations from a session token
//!
//! Both are pure functions of the token. The storage key is a truncated
//! SHA-256 of the token, so the store never holds anything that can be turned
//! back into a working token. The CSRF value is a truncated HMAC-SHA-256 keyed
//! with a domain-separation label, so it differs from the storage key even
//! though the underlying hash is shared.

use crate::session::{CSRF_BYTES, STORAGE_KEY_BYTES, StorageKey, Token, TokenClass};

use super::encoding::encode;
use super::errors::CryptoError;
use super::provider::CryptoProvider;

/// Label keying the CSRF derivation.
pub const CSRF_LABEL: &str = "csrf";

#[derive(Debug, Clone)]
pub struct KeyDerivation {
    csrf_label: String,
}

impl Default for KeyDerivation {
    fn default() -> Self {
        Self {
            csrf_label: CSRF_LABEL.to_string(),
        }
    }
}

impl KeyDerivation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derivation with a custom CSRF label. Every CSRF value issued under one
    /// label is invalid under another.
    pub fn with_csrf_label(label: impl Into<String>) -> Self {
        Self {
            csrf_label: label.into(),
        }
    }

    pub fn csrf_label(&self) -> &str {
        &self.csrf_label
    }

    /// Lookup key for a user token: the first [`STORAGE_KEY_BYTES`] bytes of
    /// SHA-256 over the token's ASCII bytes.
    pub fn storage_key_of(&self, crypto: &dyn CryptoProvider, token: &Token) -> StorageKey {
        let digest = crypto.sha256(token.as_str().as_bytes());
        let mut key = [0u8; STORAGE_KEY_BYTES];
        key.copy_from_slice(&digest[..STORAGE_KEY_BYTES]);
        StorageKey::from_bytes(key)
    }

    /// CSRF value for a user token: HMAC-SHA-256 keyed with the label,
    /// truncated to [`CSRF_BYTES`] and encoded. The result has the guest
    /// token length.
    pub fn csrf_of(
        &self,
        crypto: &dyn CryptoProvider,
        token: &Token,
    ) -> Result<Token, CryptoError> {
        let mac = crypto.hmac_sha256(self.csrf_label.as_bytes(), token.as_str().as_bytes())?;
        Ok(Token::from_encoded(encode(&mac[..CSRF_BYTES]), TokenClass::Guest))
    }
}
