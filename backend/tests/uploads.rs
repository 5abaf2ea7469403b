mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;

use common::{Session, TestApp, TestResponse, ADMIN_EMAIL, ADMIN_PASSWORD};
use hackportal::config::Config;

const BOUNDARY: &str = "hackportal-test-boundary";

fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(
    app: &TestApp,
    user: &Session,
    field: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/uploads")
        .header(header::AUTHORIZATION, format!("Bearer {}", user.token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field, filename, content_type, data)))
        .unwrap();
    app.send(request).await
}

async fn download(app: &TestApp, key: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let request = Request::builder()
        .uri(format!("/uploads/{key}"))
        .body(Body::empty())
        .unwrap();
    app.send_raw(request).await
}

/// App storing uploads under a fresh directory on disk.
async fn disk_app(dir: &tempfile::TempDir) -> TestApp {
    let mut config = Config::for_tests();
    config.upload_dir = dir.path().to_string_lossy().into_owned();
    config.admin_email = Some(ADMIN_EMAIL.to_string());
    config.admin_password = Some(ADMIN_PASSWORD.to_string());
    TestApp::with_config(config).await
}

#[tokio::test]
async fn test_upload_and_download() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", "student").await;

    let res = upload(&app, &alice, "file", "Pitch Deck.PDF", "application/pdf", b"%PDF-1.7 demo").await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    let key = res.body["key"].as_str().unwrap().to_string();
    assert!(key.ends_with(".pdf"));
    assert_eq!(res.body["url"], format!("/uploads/{key}"));
    assert_eq!(res.body["size"], 13);
    assert_eq!(res.body["content_type"], "application/pdf");

    let download = Request::builder()
        .uri(format!("/uploads/{key}"))
        .body(Body::empty())
        .unwrap();
    let (status, content_type, bytes) = app.send_raw(download).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/pdf"));
    assert_eq!(bytes, b"%PDF-1.7 demo");

    let missing = app
        .request(Method::GET, "/uploads/doesnotexist.pdf", None, None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_limits() {
    let mut config = Config::for_tests();
    config.max_upload_bytes = 16;
    let app = TestApp::with_config(config).await;
    let alice = app.register("Alice", "student").await;

    let html = upload(&app, &alice, "file", "page.html", "text/html", b"<p>hi</p>").await;
    assert_eq!(html.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let big = upload(&app, &alice, "file", "notes.txt", "text/plain", &[b'a'; 64]).await;
    assert_eq!(big.status, StatusCode::PAYLOAD_TOO_LARGE);

    let wrong_field = upload(&app, &alice, "attachment", "notes.txt", "text/plain", b"ok").await;
    assert_eq!(wrong_field.status, StatusCode::BAD_REQUEST);

    let anonymous = app.request(Method::POST, "/api/uploads", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_disk_storage_serves_the_accepted_type() {
    let dir = tempfile::tempdir().unwrap();
    let app = disk_app(&dir).await;
    let alice = app.register("Alice", "student").await;

    let report = upload(&app, &alice, "file", "report", "application/pdf", b"%PDF-1.4").await;
    assert_eq!(report.status, StatusCode::CREATED, "{}", report.body);
    let key = report.body["key"].as_str().unwrap().to_string();
    assert!(key.ends_with(".pdf"));
    assert!(dir.path().join(&key).exists());

    let (status, content_type, bytes) = download(&app, &key).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/pdf"));
    assert_eq!(bytes, b"%PDF-1.4");

    let zip = upload(&app, &alice, "file", "code.zip", "application/x-zip-compressed", b"PK\x03\x04").await;
    assert_eq!(zip.status, StatusCode::CREATED, "{}", zip.body);
    assert_eq!(zip.body["content_type"], "application/zip");
    let (_, content_type, _) = download(&app, zip.body["key"].as_str().unwrap()).await;
    assert_eq!(content_type.as_deref(), Some("application/zip"));

    let notes = upload(&app, &alice, "file", "notes.txt", "text/markdown", b"# plan").await;
    let (_, content_type, _) = download(&app, notes.body["key"].as_str().unwrap()).await;
    assert_eq!(content_type.as_deref(), Some("text/markdown"));
}

#[tokio::test]
async fn test_replaced_and_deleted_submission_files_are_removed() {
    let dir = tempfile::tempdir().unwrap();
    let app = disk_app(&dir).await;
    let alice = app.register("Alice", "student").await;
    let coordinator = app.coordinator("Cora").await;
    app.create_team(&alice, "Uploaders", 4).await;

    let first = upload(&app, &alice, "file", "v1.pdf", "application/pdf", b"%PDF v1").await;
    let first_key = first.body["key"].as_str().unwrap().to_string();
    let submitted = app
        .post(
            "/api/submissions",
            &alice.token,
            json!({ "title": "Deck", "file_url": first.body["url"] }),
        )
        .await;
    assert_eq!(submitted.status, StatusCode::CREATED, "{}", submitted.body);
    let submission_id = submitted.body["id"].as_str().unwrap().to_string();

    // Resubmitting with the same file keeps it.
    let same = app
        .post(
            "/api/submissions",
            &alice.token,
            json!({ "title": "Deck v1.1", "file_url": first.body["url"] }),
        )
        .await;
    assert_eq!(same.status, StatusCode::OK);
    assert!(dir.path().join(&first_key).exists());

    let second = upload(&app, &alice, "file", "v2.pdf", "application/pdf", b"%PDF v2").await;
    let second_key = second.body["key"].as_str().unwrap().to_string();
    let replaced = app
        .post(
            "/api/submissions",
            &alice.token,
            json!({ "title": "Deck v2", "file_url": second.body["url"] }),
        )
        .await;
    assert_eq!(replaced.status, StatusCode::OK, "{}", replaced.body);
    assert!(!dir.path().join(&first_key).exists());
    assert_eq!(download(&app, &first_key).await.0, StatusCode::NOT_FOUND);
    assert!(dir.path().join(&second_key).exists());

    let deleted = app
        .delete(&format!("/api/submissions/{submission_id}"), &coordinator.token)
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(!dir.path().join(&second_key).exists());
}
