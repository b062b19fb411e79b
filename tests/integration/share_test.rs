//! Integration tests for upload, share list and share detail flows.

mod helpers;

use axum::http::Method;
use serde_json::{Value, json};

use cloudvault_client::UploadFile;
use cloudvault_core::types::ExpirationOption;
use cloudvault_service::LogoutReason;
use cloudvault_service::share::{
    SettingsOutcome, ShareDetailView, ShareListView, UploadFlow, UploadSettings,
};

fn files(names: &[&str]) -> Vec<UploadFile> {
    names
        .iter()
        .map(|n| UploadFile::new(*n, format!("contents of {n}")))
        .collect()
}

#[tokio::test]
async fn test_upload_with_default_settings_makes_one_call() {
    let app = helpers::TestApp::spawn().await;
    let mut ctx = app.signed_in("alice").await;
    let mut flow = UploadFlow::default();

    let report = flow
        .submit(&mut ctx, &files(&["a.txt", "b.txt"]))
        .await
        .expect("upload")
        .expect("report");

    assert!(matches!(report.settings, SettingsOutcome::NotRequested));
    assert_eq!(report.status_message(), "Files uploaded successfully!");
    assert_eq!(app.calls_to(Method::POST, "/upload").len(), 1);
    assert!(
        app.calls()
            .iter()
            .all(|c| !c.path.starts_with("/share/")),
        "no settings call expected"
    );
    assert_eq!(
        app.share_filenames(&report.share.public_id),
        vec!["a.txt", "b.txt"]
    );

    let upload = &app.calls_to(Method::POST, "/upload")[0];
    assert!(
        upload
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("multipart/form-data"))
    );
    assert!(upload.body.contains("name=\"files\""));
}

#[tokio::test]
async fn test_upload_with_settings_applies_them_once_after_upload() {
    let app = helpers::TestApp::spawn().await;
    let mut ctx = app.signed_in("alice").await;
    let mut flow = UploadFlow::new(UploadSettings::new("s3cret", ExpirationOption::OneHour));

    let report = flow
        .submit(&mut ctx, &files(&["a.txt"]))
        .await
        .expect("upload")
        .expect("report");
    let id = report.share.public_id.clone();

    assert!(matches!(report.settings, SettingsOutcome::Applied));
    assert_eq!(report.status_message(), "Files uploaded and settings applied!");

    let settings_path = format!("/share/{id}");
    let settings_calls = app.calls_to(Method::POST, &settings_path);
    assert_eq!(settings_calls.len(), 1);
    assert_eq!(
        settings_calls[0].json(),
        json!({"public_id": id, "password": "s3cret", "expires_minutes": 60})
    );

    let order: Vec<String> = app.calls().into_iter().map(|c| c.path).collect();
    let upload_at = order.iter().position(|p| p == "/upload").expect("upload call");
    let settings_at = order
        .iter()
        .position(|p| *p == settings_path)
        .expect("settings call");
    assert!(upload_at < settings_at);

    assert_eq!(app.share_password(&id).as_deref(), Some("s3cret"));
    assert!(flow.settings.is_default(), "settings reset after upload");
}

#[tokio::test]
async fn test_expiration_only_sends_null_password() {
    let app = helpers::TestApp::spawn().await;
    let mut ctx = app.signed_in("alice").await;
    let mut flow = UploadFlow::new(UploadSettings::new("", ExpirationOption::FiveMinutes));

    let report = flow
        .submit(&mut ctx, &files(&["a.txt"]))
        .await
        .expect("upload")
        .expect("report");

    let call = &app.calls_to(Method::POST, &format!("/share/{}", report.share.public_id))[0];
    assert_eq!(call.json()["password"], Value::Null);
    assert_eq!(call.json()["expires_minutes"], 5);
}

#[tokio::test]
async fn test_settings_failure_keeps_upload() {
    let app = helpers::TestApp::spawn().await;
    let mut ctx = app.signed_in("alice").await;
    let next_id = app.next_share_id();
    app.fail(
        Method::POST,
        &format!("/share/{next_id}"),
        400,
        json!({"detail": "Expiration time cannot exceed 1 day (1440 minutes)"}),
    );

    let mut flow = UploadFlow::new(UploadSettings::new("pw", ExpirationOption::OneDay));
    let report = flow
        .submit(&mut ctx, &files(&["a.txt"]))
        .await
        .expect("upload succeeds")
        .expect("report");

    assert_eq!(report.share.public_id, next_id);
    assert!(matches!(report.settings, SettingsOutcome::Failed(_)));
    assert_eq!(
        report.status_message(),
        "Files uploaded, but settings update failed: Expiration time cannot exceed 1 day (1440 minutes)"
    );
    assert!(app.share_exists(&next_id));
    assert!(ctx.session.is_authenticated());
}

#[tokio::test]
async fn test_expired_token_on_settings_logs_out_without_inline_message() {
    let app = helpers::TestApp::spawn().await;
    let mut ctx = app.signed_in("alice").await;
    let next_id = app.next_share_id();
    app.fail(
        Method::POST,
        &format!("/share/{next_id}"),
        401,
        json!({"detail": "Could not validate credentials"}),
    );

    let mut flow = UploadFlow::new(UploadSettings::new("pw", ExpirationOption::OneHour));
    let err = flow
        .submit(&mut ctx, &files(&["a.txt"]))
        .await
        .expect_err("session expired");

    assert!(err.is_token_expired());
    assert!(!ctx.session.is_authenticated());
    assert_eq!(ctx.session.last_logout(), Some(LogoutReason::TokenExpired));
    assert!(flow.message.is_none());
    assert!(flow.error.is_none());
    assert_eq!(
        flow.last_result.as_ref().map(|s| s.public_id.as_str()),
        Some(next_id.as_str())
    );
    assert!(app.share_exists(&next_id));
}

#[tokio::test]
async fn test_upload_zero_files_is_noop() {
    let app = helpers::TestApp::spawn().await;
    let mut ctx = app.signed_in("alice").await;
    let before = app.call_count();

    let result = UploadFlow::default()
        .submit(&mut ctx, &[])
        .await
        .expect("no-op");

    assert!(result.is_none());
    assert_eq!(app.call_count(), before);
}

#[tokio::test]
async fn test_upload_failure_sets_inline_error() {
    let app = helpers::TestApp::spawn().await;
    let mut ctx = app.signed_in("alice").await;
    app.fail(Method::POST, "/upload", 500, json!({"detail": "Disk full"}));

    let mut flow = UploadFlow::default();
    let err = flow
        .submit(&mut ctx, &files(&["a.txt"]))
        .await
        .expect_err("upload fails");

    assert_eq!(err.message, "Disk full");
    assert_eq!(flow.error.as_deref(), Some("Disk full"));
    assert!(ctx.session.is_authenticated());
}

#[tokio::test]
async fn test_list_and_delete_with_confirmation() {
    let app = helpers::TestApp::spawn().await;
    let mut ctx = app.signed_in("alice").await;
    let keep = app.create_share("alice", &[("a.txt", b"a")]);
    let doomed = app.create_share("alice", &[("b.txt", b"b"), ("c.txt", b"c")]);
    app.create_share("mallory", &[("x.txt", b"x")]);

    let mut view = ShareListView::new();
    view.refresh(&mut ctx).await.expect("list");
    assert_eq!(view.shares.len(), 2);
    assert_eq!(view.find(&doomed).map(|s| s.file_count), Some(2));

    let declined = view
        .delete(&mut ctx, &doomed, |_| false)
        .await
        .expect("declined");
    assert!(!declined);
    assert!(app.calls_to(Method::DELETE, &format!("/share/{doomed}")).is_empty());
    assert!(app.share_exists(&doomed));

    let deleted = view
        .delete(&mut ctx, &doomed, |share| share.public_id == doomed)
        .await
        .expect("delete");
    assert!(deleted);
    assert!(!app.share_exists(&doomed));
    assert!(view.find(&doomed).is_none());
    assert!(view.find(&keep).is_some());
}

#[tokio::test]
async fn test_list_marks_expired_shares() {
    let app = helpers::TestApp::spawn().await;
    let mut ctx = app.signed_in("alice").await;
    let live = app.create_share("alice", &[("a.txt", b"a")]);
    let stale = app.create_share("alice", &[("b.txt", b"b")]);
    app.expire_share(&stale);

    let mut view = ShareListView::new();
    view.refresh(&mut ctx).await.expect("list");
    let now = chrono::Utc::now();

    for (share, expiry) in view.with_expiry(now) {
        if share.public_id == stale {
            assert_eq!(expiry.label(), "Expired");
        } else {
            assert_eq!(share.public_id, live);
            assert!(!expiry.is_expired());
        }
    }
}

#[tokio::test]
async fn test_delete_file_removes_only_that_file() {
    let app = helpers::TestApp::spawn().await;
    let mut ctx = app.signed_in("alice").await;
    let id = app.create_share("alice", &[("a.txt", b"a"), ("b.txt", b"b"), ("c.txt", b"c")]);
    let ids = app.share_file_ids(&id);

    let mut view = ShareDetailView::open(&mut ctx, &id).await.expect("open");
    let removed = view
        .delete_file(&mut ctx, ids[1], |_| true)
        .await
        .expect("delete file");

    assert!(removed);
    let local: Vec<i64> = view.share.files.iter().map(|f| f.id).collect();
    assert_eq!(local, vec![ids[0], ids[2]]);
    assert_eq!(app.share_filenames(&id), vec!["a.txt", "c.txt"]);
}

#[tokio::test]
async fn test_delete_file_failure_leaves_list_unchanged() {
    let app = helpers::TestApp::spawn().await;
    let mut ctx = app.signed_in("alice").await;
    let id = app.create_share("alice", &[("a.txt", b"a"), ("b.txt", b"b")]);
    let ids = app.share_file_ids(&id);
    app.fail(
        Method::DELETE,
        &format!("/share/{id}/file/{}", ids[0]),
        500,
        json!({"detail": "Storage unavailable"}),
    );

    let mut view = ShareDetailView::open(&mut ctx, &id).await.expect("open");
    let before = view.share.files.clone();
    let err = view
        .delete_file(&mut ctx, ids[0], |_| true)
        .await
        .expect_err("server error");

    assert_eq!(err.message, "Storage unavailable");
    assert_eq!(view.share.files, before);
    assert_eq!(view.error.as_deref(), Some("Storage unavailable"));
}

#[tokio::test]
async fn test_add_files_replaces_file_list() {
    let app = helpers::TestApp::spawn().await;
    let mut ctx = app.signed_in("alice").await;
    let id = app.create_share("alice", &[("a.txt", b"a")]);

    let mut view = ShareDetailView::open(&mut ctx, &id).await.expect("open");
    view.add_files(&mut ctx, &files(&["b.txt", "c.txt"]))
        .await
        .expect("add files");

    let names: Vec<&str> = view.share.files.iter().map(|f| f.filename.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    assert_eq!(app.calls_to(Method::POST, &format!("/share/{id}/files")).len(), 1);
}

#[tokio::test]
async fn test_update_settings_sends_null_for_empty_password_and_refreshes() {
    let app = helpers::TestApp::spawn().await;
    let mut ctx = app.signed_in("alice").await;
    let id = app.create_share("alice", &[("a.txt", b"a")]);
    app.set_share_password(&id, "old");

    let mut view = ShareDetailView::open(&mut ctx, &id).await.expect("open");
    view.update_settings(&mut ctx, "", Some(ExpirationOption::TwelveHours))
        .await
        .expect("update");

    let call = &app.calls_to(Method::POST, &format!("/share/{id}"))[0];
    assert_eq!(call.json(), json!({"password": null, "expires_minutes": 720}));
    assert_eq!(app.share_password(&id).as_deref(), Some("old"));
    assert_eq!(app.calls_to(Method::GET, &format!("/share/{id}")).len(), 2);
    assert_eq!(view.success.as_deref(), Some("Settings updated successfully!"));
    assert!(view.share.password_protected);
}

#[tokio::test]
async fn test_token_expiry_during_detail_op_logs_out() {
    let app = helpers::TestApp::spawn().await;
    let mut ctx = app.signed_in("alice").await;
    let id = app.create_share("alice", &[("a.txt", b"a")]);
    let mut view = ShareDetailView::open(&mut ctx, &id).await.expect("open");

    app.revoke_tokens();
    let err = view
        .update_settings(&mut ctx, "pw", None)
        .await
        .expect_err("expired");

    assert!(err.is_token_expired());
    assert_eq!(ctx.session.last_logout(), Some(LogoutReason::TokenExpired));
    assert!(view.error.is_none());
}
