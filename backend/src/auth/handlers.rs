//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for registration, login and
//! the current-user lookup, and delegate to `auth::service` for the core logic.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::middleware::AuthUser;
use super::models::{AuthResponse, LoginRequest, RegisterRequest};
use super::service;
use crate::database::models::User;
use crate::errors::AppResult;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let response = service::register(state.db.pool(), &state.jwt, req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = service::login(state.db.pool(), &state.jwt, req).await?;
    Ok(Json(response))
}

pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.0)
}
