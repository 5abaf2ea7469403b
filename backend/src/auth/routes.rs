//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user login, registration and the current-user lookup.
//! They are nested under `/api/auth` by the main router.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{login, me, register};
use crate::state::AppState;

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}
