mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{message, TestApp};

#[tokio::test]
async fn test_direct_messages() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", "student").await;
    let bob = app.register("Bob", "mentor").await;

    let to_self = app
        .post("/api/messages", &alice.token, json!({ "recipient_id": alice.id, "body": "hi" }))
        .await;
    assert_eq!(to_self.status, StatusCode::BAD_REQUEST);

    let nobody = app
        .post("/api/messages", &alice.token, json!({ "recipient_id": "missing", "body": "hi" }))
        .await;
    assert_eq!(nobody.status, StatusCode::NOT_FOUND);

    let too_long = app
        .post(
            "/api/messages",
            &alice.token,
            json!({ "recipient_id": bob.id, "body": "x".repeat(2001) }),
        )
        .await;
    assert_eq!(too_long.status, StatusCode::BAD_REQUEST);

    let sent = app
        .post("/api/messages", &alice.token, json!({ "recipient_id": bob.id, "body": "Can you help?" }))
        .await;
    assert_eq!(sent.status, StatusCode::CREATED);
    let message_id = sent.body["id"].as_str().unwrap().to_string();

    app.post("/api/messages", &bob.token, json!({ "recipient_id": alice.id, "body": "Sure!" }))
        .await;

    let inbox = app.get("/api/messages/inbox", &bob.token).await;
    assert_eq!(inbox.body.as_array().unwrap().len(), 1);
    assert_eq!(inbox.body[0]["is_read"], false);

    let sent_box = app.get("/api/messages/sent", &alice.token).await;
    assert_eq!(sent_box.body.as_array().unwrap().len(), 1);

    let thread = app.get(&format!("/api/messages/with/{}", bob.id), &alice.token).await;
    let bodies: Vec<&str> = thread
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["body"].as_str().unwrap())
        .collect();
    assert_eq!(bodies, vec!["Can you help?", "Sure!"]);

    let not_recipient = app
        .post(&format!("/api/messages/{message_id}/read"), &alice.token, json!({}))
        .await;
    assert_eq!(not_recipient.status, StatusCode::NOT_FOUND);

    let read = app
        .post(&format!("/api/messages/{message_id}/read"), &bob.token, json!({}))
        .await;
    assert_eq!(read.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_notification_feed() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", "student").await;
    let bob = app.register("Bob", "student").await;

    for body in ["one", "two", "three"] {
        app.post("/api/messages", &bob.token, json!({ "recipient_id": alice.id, "body": body }))
            .await;
    }

    let all = app.get("/api/notifications", &alice.token).await;
    let ids: Vec<String> = all
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids.len(), 3);

    let foreign = app
        .post(&format!("/api/notifications/{}/read", ids[0]), &bob.token, json!({}))
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);

    let read = app
        .post(&format!("/api/notifications/{}/read", ids[0]), &alice.token, json!({}))
        .await;
    assert_eq!(read.status, StatusCode::NO_CONTENT);

    let unread = app.get("/api/notifications?unread_only=true", &alice.token).await;
    assert_eq!(unread.body.as_array().unwrap().len(), 2);

    let deleted = app
        .delete(&format!("/api/notifications/{}", ids[1]), &alice.token)
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let marked = app.post("/api/notifications/read-all", &alice.token, json!({})).await;
    assert_eq!(marked.body["updated"], 1);

    let count = app.get("/api/notifications/unread-count", &alice.token).await;
    assert_eq!(count.body["count"], 0);
}

#[tokio::test]
async fn test_survey_lifecycle() {
    let app = TestApp::new().await;
    let coordinator = app.coordinator("Cora").await;
    let alice = app.register("Alice", "student").await;

    let denied = app
        .post("/api/surveys", &alice.token, json!({ "title": "Mine", "questions": ["Q?"] }))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let blank = app
        .post("/api/surveys", &coordinator.token, json!({ "title": "Blank", "questions": ["ok", " "] }))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let created = app
        .post(
            "/api/surveys",
            &coordinator.token,
            json!({ "title": "Feedback", "questions": ["How was the food?", "Would you come back?"] }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["is_open"], true);
    let id = created.body["id"].as_str().unwrap().to_string();
    let respond_uri = format!("/api/surveys/{id}/responses");

    let wrong_count = app
        .post(&respond_uri, &alice.token, json!({ "answers": ["Great"] }))
        .await;
    assert_eq!(wrong_count.status, StatusCode::BAD_REQUEST);

    let first = app
        .post(&respond_uri, &alice.token, json!({ "answers": ["Great", "Maybe"] }))
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let changed = app
        .post(&respond_uri, &alice.token, json!({ "answers": ["Great", "Yes"] }))
        .await;
    assert_eq!(changed.status, StatusCode::OK);

    let closed = app
        .post(&format!("/api/surveys/{id}/close"), &coordinator.token, json!({}))
        .await;
    assert_eq!(closed.body["is_open"], false);

    let late = app
        .post(&respond_uri, &alice.token, json!({ "answers": ["Late", "No"] }))
        .await;
    assert_eq!(late.status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&late), "Survey is closed");

    let results = app
        .get(&format!("/api/surveys/{id}/results"), &coordinator.token)
        .await;
    assert_eq!(results.status, StatusCode::OK);
    let responses = results.body["responses"].as_array().unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["answers"], json!(["Great", "Yes"]));

    let listed = app.get("/api/surveys", &alice.token).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}
