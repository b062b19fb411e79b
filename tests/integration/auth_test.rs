//! Integration tests for login, forced password change and session expiry.

mod helpers;

use std::sync::Arc;

use axum::http::Method;

use cloudvault_core::types::{Session, User};
use cloudvault_service::routing::{self, Route, Screen};
use cloudvault_service::session::{FileSessionStore, SessionStore};
use cloudvault_service::{AppContext, LogoutReason, SessionContext, auth};

#[tokio::test]
async fn test_login_stores_token_user_and_flag() {
    let app = helpers::TestApp::spawn().await;
    app.add_user("alice", "password123", false);
    let mut ctx = app.context();

    auth::login(&mut ctx, "alice", "password123")
        .await
        .expect("login");

    assert!(ctx.session.is_authenticated());
    assert_eq!(ctx.session.user().map(|u| u.username.as_str()), Some("alice"));
    assert!(ctx.session.token().is_some_and(|t| t.starts_with("token-alice-")));
    assert!(!ctx.session.must_change_password());

    let calls = app.calls_to(Method::POST, "/token");
    assert_eq!(calls.len(), 1);
    assert!(
        calls[0]
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
    );
    assert!(calls[0].body.contains("username=alice"));
}

#[tokio::test]
async fn test_failed_login_leaves_session_signed_out() {
    let app = helpers::TestApp::spawn().await;
    app.add_user("alice", "password123", false);
    let mut ctx = app.context();

    let err = auth::login(&mut ctx, "alice", "wrong")
        .await
        .expect_err("bad password");

    assert_eq!(err.message, "Incorrect username or password");
    assert_eq!(err.status, Some(401));
    assert!(!ctx.session.is_authenticated());
    assert_eq!(ctx.session.last_logout(), None);
}

#[tokio::test]
async fn test_blank_credentials_issue_no_request() {
    let app = helpers::TestApp::spawn().await;
    let mut ctx = app.context();

    assert!(auth::login(&mut ctx, "  ", "pw").await.is_err());
    assert!(auth::login(&mut ctx, "alice", "").await.is_err());
    assert_eq!(app.call_count(), 0);
}

#[tokio::test]
async fn test_must_change_password_gates_dashboard() {
    let app = helpers::TestApp::spawn().await;
    app.add_user("bob", "temp-pass", true);
    let mut ctx = app.context();

    auth::login(&mut ctx, "bob", "temp-pass").await.expect("login");
    assert!(ctx.session.must_change_password());
    assert_eq!(
        routing::screen_for(&Route::Home, ctx.session.session()),
        Screen::ChangePassword
    );
    assert!(ctx.dashboard_token().is_err());

    let token_before = ctx.session.token().map(str::to_string);
    auth::change_password(&mut ctx, "new-password-1", "new-password-1")
        .await
        .expect("change password");

    assert!(!ctx.session.must_change_password());
    assert_eq!(ctx.session.token().map(str::to_string), token_before);
    assert_eq!(
        routing::screen_for(&Route::Home, ctx.session.session()),
        Screen::Dashboard
    );

    let calls = app.calls_to(Method::POST, "/change-password");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].json()["new_password"], "new-password-1");
    assert_eq!(
        calls[0].authorization.as_deref(),
        token_before.map(|t| format!("Bearer {t}")).as_deref()
    );
}

#[tokio::test]
async fn test_change_password_validation_issues_no_request() {
    let app = helpers::TestApp::spawn().await;
    app.add_user("bob", "temp-pass", true);
    let mut ctx = app.context();
    auth::login(&mut ctx, "bob", "temp-pass").await.expect("login");
    let before = app.call_count();

    let err = auth::change_password(&mut ctx, "abcdefgh", "abcdefgX")
        .await
        .expect_err("mismatch");
    assert_eq!(err.message, "New passwords do not match");

    let err = auth::change_password(&mut ctx, "short", "short")
        .await
        .expect_err("too short");
    assert_eq!(err.message, "Password must be at least 8 characters long");

    assert_eq!(app.call_count(), before);
    assert!(ctx.session.must_change_password());
}

#[tokio::test]
async fn test_expired_token_forces_logout() {
    let app = helpers::TestApp::spawn().await;
    let mut ctx = app.signed_in("carol").await;
    app.revoke_tokens();

    let mut list = cloudvault_service::share::ShareListView::new();
    let err = list.refresh(&mut ctx).await.expect_err("revoked token");

    assert!(err.is_token_expired());
    assert!(!ctx.session.is_authenticated());
    assert_eq!(ctx.session.last_logout(), Some(LogoutReason::TokenExpired));
    // Forced logout is not an inline error.
    assert!(list.error.is_none());
}

#[tokio::test]
async fn test_session_persists_across_contexts() {
    let app = helpers::TestApp::spawn().await;
    app.add_user("dave", "password123", false);
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session.json");

    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&path));
    let mut ctx = AppContext::new(
        app.client(),
        SessionContext::init(store.clone()).await.expect("init"),
    );
    auth::login(&mut ctx, "dave", "password123").await.expect("login");

    let restored = SessionContext::init(store.clone()).await.expect("restore");
    assert_eq!(restored.user(), Some(&User::new("dave")));
    assert_eq!(restored.token(), ctx.session.token());

    auth::logout(&mut ctx).await.expect("logout");
    assert_eq!(store.load().await.expect("load"), None::<Session>);
    assert_eq!(ctx.session.last_logout(), Some(LogoutReason::UserInitiated));
}
