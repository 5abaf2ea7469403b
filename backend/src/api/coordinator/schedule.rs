//! Event schedule handlers. Anyone signed in can read the schedule; only
//! organizers edit it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::database::models::ScheduleEvent;
use crate::database::queries::schedule::{self, EventFields};
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EventRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl EventRequest {
    fn fields(&self) -> AppResult<EventFields<'_>> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::bad_request("Title is required"));
        }
        if self.ends_at < self.starts_at {
            return Err(AppError::bad_request("Event cannot end before it starts"));
        }
        Ok(EventFields {
            title,
            description: self.description.as_deref().map(str::trim).filter(|d| !d.is_empty()),
            location: self.location.as_deref().map(str::trim).filter(|l| !l.is_empty()),
            starts_at: self.starts_at,
            ends_at: self.ends_at,
        })
    }
}

pub async fn list_events(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<ScheduleEvent>>> {
    Ok(Json(schedule::list_events(state.db.pool()).await?))
}

pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<EventRequest>,
) -> AppResult<(StatusCode, Json<ScheduleEvent>)> {
    auth.require_organizer()?;
    let event = schedule::create_event(state.db.pool(), req.fields()?, auth.id()).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<EventRequest>,
) -> AppResult<Json<ScheduleEvent>> {
    auth.require_organizer()?;
    let event = schedule::update_event(state.db.pool(), &id, req.fields()?)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))?;
    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    auth.require_organizer()?;
    if !schedule::delete_event(state.db.pool(), &id).await? {
        return Err(AppError::not_found("Event not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
