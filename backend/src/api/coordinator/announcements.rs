//! Announcement handlers. Posting an announcement notifies everyone.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::auth::AuthUser;
use crate::database::models::{Announcement, AnnouncementView};
use crate::database::queries::announcements;
use crate::errors::{AppError, AppResult};
use crate::services::notifier;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnnouncementRequest {
    pub title: String,
    pub body: String,
}

pub async fn list_announcements(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<AnnouncementView>>> {
    let list = announcements::list_for_user(state.db.pool(), auth.id()).await?;
    Ok(Json(list))
}

pub async fn create_announcement(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AnnouncementRequest>,
) -> AppResult<(StatusCode, Json<Announcement>)> {
    auth.require_organizer()?;
    let (title, body) = (req.title.trim(), req.body.trim());
    if title.is_empty() || body.is_empty() {
        return Err(AppError::bad_request("Title and body are required"));
    }

    let pool = state.db.pool();
    let announcement = announcements::create_announcement(pool, auth.id(), title, body).await?;
    info!(announcement_id = %announcement.id, "announcement posted");

    notifier::notify_everyone(pool, Some(auth.id()), title, body).await;
    Ok((StatusCode::CREATED, Json(announcement)))
}

pub async fn delete_announcement(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    auth.require_organizer()?;
    if !announcements::delete_announcement(state.db.pool(), &id).await? {
        return Err(AppError::not_found("Announcement not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let pool = state.db.pool();
    if announcements::get_announcement(pool, &id).await?.is_none() {
        return Err(AppError::not_found("Announcement not found"));
    }
    announcements::mark_read(pool, &id, auth.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}
