//! Injected source of randomness and hash primitives
//!
//! The lifecycle engine never reaches for a global RNG. Production code uses
//! [`RingCryptoProvider`]; tests and fixtures can swap in
//! [`SeededCryptoProvider`] for reproducible tokens.

use std::sync::atomic::{AtomicU64, Ordering};

use hmac::{Hmac, Mac};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::{Digest, Sha256};

use super::errors::CryptoError;

type HmacSha256 = Hmac<Sha256>;

pub trait CryptoProvider: Send + Sync + 'static {
    /// Fill `dest` with cryptographically secure random bytes.
    fn fill_random(&self, dest: &mut [u8]) -> Result<(), CryptoError>;

    /// SHA-256 digest of `data`.
    fn sha256(&self, data: &[u8]) -> [u8; 32] {
        Sha256::digest(data).into()
    }

    /// HMAC-SHA-256 of `data` keyed with `key`.
    fn hmac_sha256(&self, key: &[u8], data: &[u8]) -> Result<[u8; 32], CryptoError> {
        let mut mac =
            HmacSha256::new_from_slice(key).map_err(|e| CryptoError::Hmac(e.to_string()))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().into())
    }
}

/// Operating-system CSPRNG via `ring`.
#[derive(Clone)]
pub struct RingCryptoProvider {
    rng: SystemRandom,
}

impl RingCryptoProvider {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for RingCryptoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoProvider for RingCryptoProvider {
    fn fill_random(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        self.rng.fill(dest).map_err(|_| {
            tracing::error!("System random source failed");
            CryptoError::RandomSource("Failed to generate random bytes".to_string())
        })
    }
}

/// Deterministic byte stream: block `n` is `SHA-256(seed || n)`.
///
/// Not a CSPRNG in any useful sense once the seed is known. Tests only.
pub struct SeededCryptoProvider {
    seed: [u8; 32],
    counter: AtomicU64,
}

impl SeededCryptoProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            seed: Sha256::digest(seed.to_be_bytes()).into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl CryptoProvider for SeededCryptoProvider {
    fn fill_random(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        for chunk in dest.chunks_mut(32) {
            let n = self.counter.fetch_add(1, Ordering::Relaxed);
            let mut hasher = Sha256::new();
            hasher.update(self.seed);
            hasher.update(n.to_be_bytes());
            let block = hasher.finalize();
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
        Ok(())
    }
}
