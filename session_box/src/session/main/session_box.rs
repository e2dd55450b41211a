//! Session lifecycle engine
//!
//! Decides, for a presented token, whether it is a self-contained guest
//! token, a stored user token, or nothing usable, and issues or rotates
//! tokens accordingly. The engine holds no state besides its store and
//! crypto handles; every call is independent and may run concurrently with
//! others.

use std::sync::Arc;

use crate::crypto::{CryptoProvider, KeyDerivation, RingCryptoProvider};
use crate::session::errors::{SessionError, UsageError};
use crate::session::types::{EngineId, Session, SessionKind, Token, TokenClass, UserId};
use crate::storage::{SessionStore, store_from_env};

use super::token::generate_token;

pub struct SessionBox {
    id: EngineId,
    store: Arc<dyn SessionStore>,
    crypto: Arc<dyn CryptoProvider>,
    derivation: KeyDerivation,
}

impl SessionBox {
    /// Session box over `store` using the operating-system random source.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self::with_crypto(store, Arc::new(RingCryptoProvider::new()))
    }

    pub fn with_crypto(store: Arc<dyn SessionStore>, crypto: Arc<dyn CryptoProvider>) -> Self {
        Self {
            id: EngineId::next(),
            store,
            crypto,
            derivation: KeyDerivation::default(),
        }
    }

    pub fn with_derivation(mut self, derivation: KeyDerivation) -> Self {
        self.derivation = derivation;
        self
    }

    /// Session box over the store selected by `SESSION_STORE_TYPE`, after
    /// verifying the store is reachable.
    pub async fn from_env() -> Result<Self, SessionError> {
        let store = store_from_env()?;
        store.init().await.inspect_err(|e| {
            tracing::error!("Failed to initialize session store: {}", e);
        })?;
        Ok(Self::new(store))
    }

    /// Resolve the token a client presented, if any.
    ///
    /// - No token, or a string that is not a well-formed token: a new guest
    ///   session.
    /// - A guest token: read back unchanged, with the token as its own CSRF
    ///   value and no storage access.
    /// - A user token: looked up by storage key. Unknown tokens get a new guest
    ///   session, indistinguishable from presenting nothing.
    ///
    /// Only a failing store or random source produces an error.
    pub async fn get(&self, presented: Option<&str>) -> Result<Session, SessionError> {
        let Some(token) = presented.and_then(Token::parse) else {
            tracing::debug!("No valid session token presented");
            return self.create(None).await;
        };

        match token.class() {
            TokenClass::Guest => {
                tracing::debug!("Guest session token presented");
                Ok(Session::guest(self.id, token, false))
            }
            TokenClass::User => {
                let storage_key = self.derivation.storage_key_of(self.crypto.as_ref(), &token);

                let user_id = self.store.get(&storage_key).await.inspect_err(|e| {
                    tracing::error!("Failed to look up session: {}", e);
                })?;

                let Some(user_id) = user_id else {
                    tracing::debug!("Unknown or expired user token, issuing guest session");
                    return self.create(None).await;
                };

                let csrf = self.derivation.csrf_of(self.crypto.as_ref(), &token)?;
                Ok(Session::authenticated(
                    self.id,
                    token,
                    storage_key,
                    user_id,
                    csrf,
                    false,
                ))
            }
        }
    }

    /// Replace `session` with a new one for `new_user_id` (`None` for a guest).
    ///
    /// A session from a different box is rejected here, before anything runs.
    /// The returned future revokes the old user session's storage entry, if
    /// any, and only after that succeeds issues the new token. The two steps
    /// are not atomic: if the second fails the user is left with no valid
    /// session, never with the old one.
    pub fn update<'a>(
        &'a self,
        session: &Session,
        new_user_id: Option<UserId>,
    ) -> Result<impl Future<Output = Result<Session, SessionError>> + Send + use<'a>, UsageError>
    {
        if session.origin() != self.id {
            tracing::error!("Session passed to update was issued by a different session box");
            return Err(UsageError::ForeignSession);
        }

        let revoke = match session.kind() {
            SessionKind::Guest { .. } => None,
            SessionKind::Authenticated {
                user_id,
                storage_key,
                ..
            } => Some((*storage_key, user_id.clone())),
        };

        Ok(async move {
            if let Some((storage_key, user_id)) = revoke {
                self.store
                    .delete(&storage_key, &user_id)
                    .await
                    .inspect_err(|e| {
                        tracing::error!("Failed to revoke session: {}", e);
                    })?;
                tracing::debug!("Revoked user session");
            }
            self.create(new_user_id).await
        })
    }

    async fn create(&self, user_id: Option<UserId>) -> Result<Session, SessionError> {
        let Some(user_id) = user_id else {
            let token = generate_token(self.crypto.as_ref(), TokenClass::Guest)?;
            tracing::debug!("Issued new guest session");
            return Ok(Session::guest(self.id, token, true));
        };

        let token = generate_token(self.crypto.as_ref(), TokenClass::User)?;
        let storage_key = self.derivation.storage_key_of(self.crypto.as_ref(), &token);
        let csrf = self.derivation.csrf_of(self.crypto.as_ref(), &token)?;

        // The token is dropped unless the backing record is written.
        self.store
            .set(&storage_key, &user_id)
            .await
            .inspect_err(|e| {
                tracing::error!("Failed to store session: {}", e);
            })?;

        tracing::debug!("Issued new user session");
        Ok(Session::authenticated(
            self.id,
            token,
            storage_key,
            user_id,
            csrf,
            true,
        ))
    }
}
