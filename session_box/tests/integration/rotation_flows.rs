use crate::common::{TestSetup, assert_new_guest, assert_new_user};
use session_box::{InMemorySessionStore, SessionBox, UsageError, UserId};
use std::sync::Arc;

/// A guest session can be replaced with a new guest session
#[tokio::test]
async fn test_guest_replaced_with_guest() {
    let setup = TestSetup::new();
    let old = setup.sessions.get(None).await.unwrap();

    let new = setup.sessions.update(&old, None).unwrap().await.unwrap();

    assert_new_guest(&new);
    assert_ne!(old.csrf(), new.csrf());
}

/// A guest session can be replaced with a new user session
#[tokio::test]
async fn test_guest_replaced_with_user() {
    let setup = TestSetup::new();
    let old = setup.sessions.get(None).await.unwrap();

    let new = setup
        .sessions
        .update(&old, Some(UserId::from(1u64)))
        .unwrap()
        .await
        .unwrap();

    assert_new_user(&new, 1);
    assert_ne!(old.csrf(), new.csrf());
}

/// A user session can be replaced with another user's session
#[tokio::test]
async fn test_user_replaced_with_user() {
    let setup = TestSetup::new();
    let first = setup.login(1).await;

    let second = setup
        .sessions
        .update(&first, Some(UserId::from(2u64)))
        .unwrap()
        .await
        .unwrap();

    assert_new_user(&second, 2);
    assert_ne!(second.csrf(), first.csrf());
    assert_new_guest(&setup.present(&first).await);
}

/// A user session can be replaced with a new guest session (logout)
#[tokio::test]
async fn test_user_replaced_with_guest() {
    let setup = TestSetup::new();
    let guest = setup.sessions.get(None).await.unwrap();
    let user = setup
        .sessions
        .update(&guest, Some(UserId::from(1u64)))
        .unwrap()
        .await
        .unwrap();

    let logged_out = setup.sessions.update(&user, None).unwrap().await.unwrap();

    assert_new_guest(&guest);
    assert_new_guest(&logged_out);
    assert_new_guest(&setup.present(&user).await);
    assert!(setup.store.is_empty().await);
}

/// A session read back from a token can itself be rotated
#[tokio::test]
async fn test_read_session_can_be_rotated() {
    let setup = TestSetup::new();
    let login = setup.login(1).await;
    let read = setup.present(&login).await;

    let rotated = setup
        .sessions
        .update(&read, Some(UserId::from(1u64)))
        .unwrap()
        .await
        .unwrap();

    assert_new_user(&rotated, 1);
    assert_new_guest(&setup.present(&login).await);
    assert_eq!(setup.store.len().await, 1);
}

/// Sessions are bound to the box that issued them
#[tokio::test]
async fn test_update_with_foreign_session() {
    let setup = TestSetup::new();
    let other = SessionBox::new(Arc::new(InMemorySessionStore::new()));
    let foreign = other.get(None).await.unwrap();

    let result = setup.sessions.update(&foreign, None);

    assert!(matches!(result, Err(UsageError::ForeignSession)));
}
