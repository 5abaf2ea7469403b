//! Handler functions for a user's notification feed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::database::models::Notification;
use crate::database::queries::notifications;
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub updated: u64,
}

pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Notification>>> {
    let list = notifications::list_for_user(state.db.pool(), auth.id(), query.unread_only).await?;
    Ok(Json(list))
}

pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<UnreadCount>> {
    let count = notifications::unread_count(state.db.pool(), auth.id()).await?;
    Ok(Json(UnreadCount { count }))
}

pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !notifications::mark_read(state.db.pool(), &id, auth.id()).await? {
        return Err(AppError::not_found("Notification not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<MarkedRead>> {
    let updated = notifications::mark_all_read(state.db.pool(), auth.id()).await?;
    Ok(Json(MarkedRead { updated }))
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !notifications::delete_notification(state.db.pool(), &id, auth.id()).await? {
        return Err(AppError::not_found("Notification not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
