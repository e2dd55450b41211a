//! Token sizes
//!
//! Token classes are told apart by encoded length alone, so the user and
//! guest byte counts must never be equal.

/// 128 bits; unguessable and collision-free.
pub const USER_TOKEN_BYTES: usize = 16;

/// 120 bits; unguessable and deliberately distinct from [`USER_TOKEN_BYTES`].
pub const CSRF_BYTES: usize = 15;

/// 128 bits; collision-free as a lookup key.
pub const STORAGE_KEY_BYTES: usize = 16;

pub const USER_TOKEN_LENGTH: usize = 2 * USER_TOKEN_BYTES;
pub const CSRF_LENGTH: usize = 2 * CSRF_BYTES;

const _: () = assert!(USER_TOKEN_LENGTH != CSRF_LENGTH);
