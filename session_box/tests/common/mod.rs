//! Shared helpers for integration tests

use std::sync::Arc;

use session_box::{
    CSRF_LENGTH, InMemorySessionStore, STORAGE_KEY_BYTES, Session, SessionBox, USER_TOKEN_LENGTH,
    UserId,
};

pub struct TestSetup {
    pub sessions: SessionBox,
    pub store: Arc<InMemorySessionStore>,
}

impl TestSetup {
    pub fn new() -> Self {
        let store = Arc::new(InMemorySessionStore::new());
        Self {
            sessions: SessionBox::new(store.clone()),
            store,
        }
    }

    /// Guest session promoted to `user`.
    pub async fn login(&self, user: u64) -> Session {
        let guest = self.sessions.get(None).await.expect("guest session");
        self.sessions
            .update(&guest, Some(UserId::from(user)))
            .expect("session from this box")
            .await
            .expect("login succeeds")
    }

    pub async fn present(&self, session: &Session) -> Session {
        let token = session.new_token().expect("session carries a new token");
        self.sessions
            .get(Some(token.as_str()))
            .await
            .expect("lookup succeeds")
    }
}

fn is_token_of(token: &str, len: usize) -> bool {
    token.len() == len && token.bytes().all(|c| (b'a'..=b'p').contains(&c))
}

pub fn assert_new_guest(session: &Session) {
    let token = session
        .new_token()
        .expect("new guest session carries a token");
    assert!(
        is_token_of(token.as_str(), CSRF_LENGTH),
        "guest token should be {CSRF_LENGTH} letters a-p"
    );
    assert!(session.storage_key().is_none());
    assert!(session.user_id().is_none());
    assert_eq!(session.csrf(), token);
}

pub fn assert_new_user(session: &Session, user: u64) {
    let token = session.new_token().expect("new user session carries a token");
    assert!(
        is_token_of(token.as_str(), USER_TOKEN_LENGTH),
        "user token should be {USER_TOKEN_LENGTH} letters a-p"
    );
    assert_eq!(
        session.storage_key().map(|k| k.as_bytes().len()),
        Some(STORAGE_KEY_BYTES)
    );
    assert_eq!(session.user_id(), Some(&UserId::from(user)));
}
