//! Integration tests for the HTTP client: auth headers, error decoding and
//! token-expired classification against a live server.

mod helpers;

use axum::http::Method;
use serde_json::json;

use cloudvault_core::error::ErrorKind;

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let app = helpers::TestApp::spawn().await;
    let ctx = app.signed_in("alice").await;
    let token = ctx.session.token().expect("token").to_string();

    ctx.api.list_shares(&token).await.expect("list");

    let calls = app.calls_to(Method::GET, "/shares");
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].authorization.as_deref(),
        Some(format!("Bearer {token}").as_str())
    );
}

#[tokio::test]
async fn test_401_is_token_expired_regardless_of_detail() {
    let app = helpers::TestApp::spawn().await;
    app.fail(Method::GET, "/shares", 401, json!({"detail": "Nope"}));

    let err = app.client().list_shares("t").await.expect_err("401");
    assert_eq!(err.kind, ErrorKind::Api);
    assert_eq!(err.status, Some(401));
    assert_eq!(err.message, "Nope");
    assert!(err.is_token_expired());
}

#[tokio::test]
async fn test_detail_keywords_mark_token_expired() {
    let app = helpers::TestApp::spawn().await;
    let client = app.client();

    for detail in ["Token has expired", "Signature EXPIRED", "unauthorized access"] {
        app.fail(Method::GET, "/shares", 403, json!({ "detail": detail }));
        let err = client.list_shares("t").await.expect_err("403");
        assert!(err.is_token_expired(), "{detail} should be token-expired");
        assert_eq!(err.message, detail);
    }

    app.fail(Method::GET, "/shares", 403, json!({"detail": "Forbidden"}));
    let err = client.list_shares("t").await.expect_err("403");
    assert!(!err.is_token_expired());
}

#[tokio::test]
async fn test_non_json_response_reports_status_and_snippet() {
    let app = helpers::TestApp::spawn().await;
    let page = format!("<html>{}</html>", "x".repeat(300));
    app.respond_raw(Method::GET, "/shares", 502, "text/html", &page);

    let err = app.client().list_shares("t").await.expect_err("html");
    assert_eq!(err.kind, ErrorKind::InvalidResponse);
    assert_eq!(err.status, Some(502));
    assert!(err.message.starts_with("Server returned non-JSON response"));
    assert!(err.message.contains("502"));
    assert!(err.message.contains(&page[..100]));
    assert!(!err.message.contains(&page[..101]));
    assert!(!err.is_token_expired());
}

#[tokio::test]
async fn test_non_json_success_is_still_an_error() {
    let app = helpers::TestApp::spawn().await;
    app.respond_raw(Method::GET, "/shares", 200, "text/plain", "ok");

    let err = app.client().list_shares("t").await.expect_err("plain text");
    assert_eq!(err.kind, ErrorKind::InvalidResponse);
    assert_eq!(err.status, Some(200));
}

#[tokio::test]
async fn test_validation_detail_array_is_joined() {
    let app = helpers::TestApp::spawn().await;
    app.fail(
        Method::POST,
        "/token",
        422,
        json!({"detail": [{"msg": "field required"}, {"msg": "value too short"}]}),
    );

    let err = app.client().login("a", "b").await.expect_err("422");
    assert_eq!(err.status, Some(422));
    assert_eq!(err.message, "field required; value too short");
}

#[tokio::test]
async fn test_json_error_without_detail_uses_fallback() {
    let app = helpers::TestApp::spawn().await;
    app.fail(Method::GET, "/shares", 500, json!({"error": "boom"}));

    let err = app.client().list_shares("t").await.expect_err("500");
    assert_eq!(err.message, "API Request Failed");
}

#[tokio::test]
async fn test_upload_non_json_uses_upload_wording() {
    let app = helpers::TestApp::spawn().await;
    app.respond_raw(Method::POST, "/upload", 413, "text/html", "<h1>Too Large</h1>");

    let files = [cloudvault_client::UploadFile::new("a.txt", "hello")];
    let err = app
        .client()
        .upload_files(&files, "t")
        .await
        .expect_err("413");
    assert!(err.message.starts_with("Upload failed with non-JSON response"));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = cloudvault_client::ApiClient::with_base_url("http://127.0.0.1:9/api")
        .expect("client");

    let err = client.list_shares("t").await.expect_err("refused");
    assert_eq!(err.kind, ErrorKind::Transport);
    assert!(!err.is_token_expired());
}
