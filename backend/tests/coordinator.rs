mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn test_schedule_crud_and_ordering() {
    let app = TestApp::new().await;
    let coordinator = app.coordinator("Cora").await;
    let alice = app.register("Alice", "student").await;

    let denied = app
        .post(
            "/api/coordinator/schedule",
            &alice.token,
            json!({
                "title": "Hacking starts",
                "starts_at": "2026-03-01T09:00:00Z",
                "ends_at": "2026-03-01T10:00:00Z",
            }),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let backwards = app
        .post(
            "/api/coordinator/schedule",
            &coordinator.token,
            json!({
                "title": "Time travel",
                "starts_at": "2026-03-01T10:00:00Z",
                "ends_at": "2026-03-01T09:00:00Z",
            }),
        )
        .await;
    assert_eq!(backwards.status, StatusCode::BAD_REQUEST);

    let closing = app
        .post(
            "/api/coordinator/schedule",
            &coordinator.token,
            json!({
                "title": "Closing",
                "location": "Main hall",
                "starts_at": "2026-03-02T17:00:00Z",
                "ends_at": "2026-03-02T18:00:00Z",
            }),
        )
        .await;
    assert_eq!(closing.status, StatusCode::CREATED);
    let closing_id = closing.body["id"].as_str().unwrap().to_string();

    let opening = app
        .post(
            "/api/coordinator/schedule",
            &coordinator.token,
            json!({
                "title": "Opening",
                "starts_at": "2026-03-01T09:00:00Z",
                "ends_at": "2026-03-01T10:00:00Z",
            }),
        )
        .await;
    assert_eq!(opening.status, StatusCode::CREATED);

    let events = app.get("/api/coordinator/schedule", &alice.token).await;
    let titles: Vec<&str> = events
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Opening", "Closing"]);

    let updated = app
        .put(
            &format!("/api/coordinator/schedule/{closing_id}"),
            &coordinator.token,
            json!({
                "title": "Closing & awards",
                "starts_at": "2026-03-02T17:00:00Z",
                "ends_at": "2026-03-02T19:00:00Z",
            }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["title"], "Closing & awards");

    let deleted = app
        .delete(&format!("/api/coordinator/schedule/{closing_id}"), &coordinator.token)
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let again = app
        .delete(&format!("/api/coordinator/schedule/{closing_id}"), &coordinator.token)
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_announcements_notify_and_track_reads() {
    let app = TestApp::new().await;
    let coordinator = app.coordinator("Cora").await;
    let alice = app.register("Alice", "student").await;
    let mentor = app.register("Mona", "mentor").await;

    let posted = app
        .post(
            "/api/coordinator/announcements",
            &coordinator.token,
            json!({ "title": "Lunch", "body": "Pizza in the lobby" }),
        )
        .await;
    assert_eq!(posted.status, StatusCode::CREATED);
    let id = posted.body["id"].as_str().unwrap().to_string();

    for user in [&alice, &mentor] {
        let count = app.get("/api/notifications/unread-count", &user.token).await;
        assert_eq!(count.body["count"], 1);
    }

    let list = app.get("/api/coordinator/announcements", &alice.token).await;
    assert_eq!(list.body[0]["is_read"], false);

    let read = app
        .post(&format!("/api/coordinator/announcements/{id}/read"), &alice.token, json!({}))
        .await;
    assert_eq!(read.status, StatusCode::NO_CONTENT);

    let list = app.get("/api/coordinator/announcements", &alice.token).await;
    assert_eq!(list.body[0]["is_read"], true);
    let list = app.get("/api/coordinator/announcements", &mentor.token).await;
    assert_eq!(list.body[0]["is_read"], false);

    let denied = app
        .delete(&format!("/api/coordinator/announcements/{id}"), &alice.token)
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let deleted = app
        .delete(&format!("/api/coordinator/announcements/{id}"), &coordinator.token)
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_stats_counts_everything() {
    let app = TestApp::new().await;
    let coordinator = app.coordinator("Cora").await;
    let alice = app.register("Alice", "student").await;
    let judge = app.register("Jules", "judge").await;
    app.create_team(&alice, "Counted", 4).await;
    let id = app.submit(&alice, "Project").await;
    app.post(
        "/api/judge/evaluations",
        &judge.token,
        json!({ "submission_id": id, "innovation": 5, "execution": 5, "presentation": 5 }),
    )
    .await;

    let denied = app.get("/api/coordinator/stats", &alice.token).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let stats = app.get("/api/coordinator/stats", &coordinator.token).await;
    assert_eq!(stats.status, StatusCode::OK);
    // admin, coordinator, student, judge
    assert_eq!(stats.body["total_users"], 4);
    assert_eq!(stats.body["teams"], 1);
    assert_eq!(stats.body["submissions"], 1);
    assert_eq!(stats.body["evaluations"], 1);

    let students = stats.body["users_by_role"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["role"] == "student")
        .unwrap();
    assert_eq!(students["count"], 1);
}
