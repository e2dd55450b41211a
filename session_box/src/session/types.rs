use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::crypto::is_encoded;

use super::config::{
    CSRF_BYTES, CSRF_LENGTH, STORAGE_KEY_BYTES, USER_TOKEN_BYTES, USER_TOKEN_LENGTH,
};

/// Which kind of token a string is, decided by its encoded length alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// Backed by a storage record mapping its storage key to a user.
    User,
    /// Self-contained; also the length of every CSRF value.
    Guest,
}

impl TokenClass {
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            USER_TOKEN_LENGTH => Some(Self::User),
            CSRF_LENGTH => Some(Self::Guest),
            _ => None,
        }
    }

    /// Number of random bytes behind a token of this class.
    pub const fn byte_len(self) -> usize {
        match self {
            Self::User => USER_TOKEN_BYTES,
            Self::Guest => CSRF_BYTES,
        }
    }

    pub const fn encoded_len(self) -> usize {
        2 * self.byte_len()
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Guest => f.write_str("guest"),
        }
    }
}

/// A session or CSRF token over the `a`..=`p` alphabet.
///
/// Only obtainable through [`Token::parse`] or from the session box, so
/// arbitrary text can't stand in for a token. `Debug` output is redacted.
#[derive(Clone)]
pub struct Token {
    value: String,
    class: TokenClass,
}

impl Token {
    /// Accept `s` only if its length names a token class and every character
    /// is in the encoding alphabet. Nothing is partially parsed.
    pub fn parse(s: &str) -> Option<Self> {
        let class = TokenClass::from_len(s.len())?;
        if !is_encoded(s) {
            return None;
        }
        Some(Self {
            value: s.to_string(),
            class,
        })
    }

    pub(crate) fn from_encoded(value: String, class: TokenClass) -> Self {
        debug_assert_eq!(value.len(), class.encoded_len());
        Self { value, class }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn class(&self) -> TokenClass {
        self.class
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.value.as_bytes().ct_eq(other.value.as_bytes()).into()
    }
}

impl Eq for Token {}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("class", &self.class)
            .field("len", &self.value.len())
            .finish_non_exhaustive()
    }
}

/// One-way lookup key derived from a user token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StorageKey([u8; STORAGE_KEY_BYTES]);

impl StorageKey {
    pub fn from_bytes(bytes: [u8; STORAGE_KEY_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; STORAGE_KEY_BYTES] {
        &self.0
    }
}

/// Lowercase hex.
impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02x}"))
    }
}

/// Identity a user session belongs to. Guests have none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tags sessions with the box that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EngineId(u64);

impl EngineId {
    pub(crate) fn next() -> Self {
        static NEXT_ENGINE_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ENGINE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionKind {
    /// The token is its own CSRF value; nothing is stored.
    Guest {
        csrf: Token,
        new_token: Option<Token>,
    },
    Authenticated {
        user_id: UserId,
        storage_key: StorageKey,
        csrf: Token,
        new_token: Option<Token>,
    },
}

/// Result of one lifecycle operation. Never changes after construction.
///
/// `new_token` is present only when the operation issued a token that the
/// caller must hand to the client (for instance as a cookie).
#[derive(Debug, Clone)]
pub struct Session {
    origin: EngineId,
    kind: SessionKind,
}

impl Session {
    pub(crate) fn guest(origin: EngineId, token: Token, issued: bool) -> Self {
        Self {
            origin,
            kind: SessionKind::Guest {
                csrf: token.clone(),
                new_token: issued.then_some(token),
            },
        }
    }

    pub(crate) fn authenticated(
        origin: EngineId,
        token: Token,
        storage_key: StorageKey,
        user_id: UserId,
        csrf: Token,
        issued: bool,
    ) -> Self {
        Self {
            origin,
            kind: SessionKind::Authenticated {
                user_id,
                storage_key,
                csrf,
                new_token: issued.then_some(token),
            },
        }
    }

    pub(crate) fn origin(&self) -> EngineId {
        self.origin
    }

    pub fn kind(&self) -> &SessionKind {
        &self.kind
    }

    pub fn new_token(&self) -> Option<&Token> {
        match &self.kind {
            SessionKind::Guest { new_token, .. } | SessionKind::Authenticated { new_token, .. } => {
                new_token.as_ref()
            }
        }
    }

    pub fn csrf(&self) -> &Token {
        match &self.kind {
            SessionKind::Guest { csrf, .. } | SessionKind::Authenticated { csrf, .. } => csrf,
        }
    }

    pub fn user_id(&self) -> Option<&UserId> {
        match &self.kind {
            SessionKind::Guest { .. } => None,
            SessionKind::Authenticated { user_id, .. } => Some(user_id),
        }
    }

    pub fn storage_key(&self) -> Option<&StorageKey> {
        match &self.kind {
            SessionKind::Guest { .. } => None,
            SessionKind::Authenticated { storage_key, .. } => Some(storage_key),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.kind, SessionKind::Authenticated { .. })
    }

    /// Constant-time check of a CSRF value submitted with a request.
    pub fn verify_csrf(&self, presented: &str) -> bool {
        presented
            .as_bytes()
            .ct_eq(self.csrf().as_str().as_bytes())
            .into()
    }
}
