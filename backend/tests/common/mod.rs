#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use hackportal::config::Config;
use hackportal::state::AppState;

pub const ADMIN_EMAIL: &str = "admin@hackportal.test";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const PASSWORD: &str = "secret123";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct Session {
    pub id: String,
    pub token: String,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Fresh in-memory app with a bootstrap admin account.
    pub async fn new() -> Self {
        let mut config = Config::for_tests();
        config.admin_email = Some(ADMIN_EMAIL.to_string());
        config.admin_password = Some(ADMIN_PASSWORD.to_string());
        Self::with_config(config).await
    }

    pub async fn with_config(config: Config) -> Self {
        let state = AppState::new(config).await.expect("state");
        let router = hackportal::app(state.clone());
        Self { router, state }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        TestResponse { status, body }
    }

    /// Status, content type and raw body, for non-JSON responses.
    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, content_type, bytes.to_vec())
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    pub async fn register(&self, name: &str, role: &str) -> Session {
        let email = format!("{}@example.com", name.to_lowercase());
        let res = self
            .request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({ "name": name, "email": email, "password": PASSWORD, "role": role })),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "register {name}: {}", res.body);
        session(&res.body)
    }

    pub async fn admin(&self) -> Session {
        let res = self
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "admin login: {}", res.body);
        session(&res.body)
    }

    /// Registers a student and promotes them to coordinator.
    pub async fn coordinator(&self, name: &str) -> Session {
        let user = self.register(name, "student").await;
        let admin = self.admin().await;
        let res = self
            .put(
                &format!("/api/users/{}/role", user.id),
                &admin.token,
                json!({ "role": "coordinator" }),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "promote {name}: {}", res.body);
        user
    }

    /// Creates a team led by `leader` and returns (team id, join code).
    pub async fn create_team(&self, leader: &Session, name: &str, capacity: i64) -> (String, String) {
        let res = self
            .post(
                "/api/teams",
                &leader.token,
                json!({ "name": name, "capacity": capacity }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "create team {name}: {}", res.body);
        (
            res.body["id"].as_str().unwrap().to_string(),
            res.body["join_code"].as_str().unwrap().to_string(),
        )
    }

    /// Submits a project for the leader's team and returns the submission id.
    pub async fn submit(&self, member: &Session, title: &str) -> String {
        let res = self
            .post(
                "/api/submissions",
                &member.token,
                json!({ "title": title, "repo_url": "https://github.com/example/project" }),
            )
            .await;
        assert!(res.status.is_success(), "submit {title}: {}", res.body);
        res.body["id"].as_str().unwrap().to_string()
    }
}

fn session(body: &Value) -> Session {
    Session {
        id: body["user"]["id"].as_str().unwrap().to_string(),
        token: body["token"].as_str().unwrap().to_string(),
    }
}

pub fn message(res: &TestResponse) -> &str {
    res.body["message"].as_str().unwrap_or_default()
}
