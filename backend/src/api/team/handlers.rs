//! Handler functions for team formation endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::auth::{AuthUser, Role};
use crate::database::models::{Team, TeamDetail, TeamSummary};
use crate::database::queries::submissions;
use crate::database::queries::teams::{self, LeaveOutcome};
use crate::errors::{AppError, AppResult};
use crate::services::submissions::discard_upload;
use crate::services::teams as team_service;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct JoinTeamRequest {
    pub join_code: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignMentorRequest {
    pub mentor_id: String,
}

pub async fn create_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTeamRequest>,
) -> AppResult<(StatusCode, Json<TeamDetail>)> {
    auth.require(&[Role::Student])?;
    let pool = state.db.pool();
    let team = team_service::create_team(
        pool,
        auth.user(),
        &req.name,
        req.description.as_deref(),
        req.capacity,
    )
    .await?;
    let detail = team_service::team_detail(pool, team).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn list_teams(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<TeamSummary>>> {
    Ok(Json(teams::list_teams(state.db.pool()).await?))
}

pub async fn my_team(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<TeamDetail>> {
    let pool = state.db.pool();
    let team = teams::team_for_user(pool, auth.id())
        .await?
        .ok_or_else(|| AppError::not_found("You are not in a team"))?;
    Ok(Json(team_service::team_detail(pool, team).await?))
}

pub async fn get_team(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<TeamDetail>> {
    let pool = state.db.pool();
    let team = teams::get_team(pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Team not found"))?;
    Ok(Json(team_service::team_detail(pool, team).await?))
}

pub async fn join_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<JoinTeamRequest>,
) -> AppResult<Json<TeamDetail>> {
    auth.require(&[Role::Student])?;
    let pool = state.db.pool();
    let team = team_service::join_team(pool, auth.user(), &req.join_code).await?;
    Ok(Json(team_service::team_detail(pool, team).await?))
}

pub async fn leave_team(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<LeaveOutcome>> {
    let outcome = team_service::leave_team(state.db.pool(), auth.user()).await?;
    Ok(Json(outcome))
}

pub async fn regenerate_join_code(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Team>> {
    let team = team_service::regenerate_join_code(state.db.pool(), auth.user(), &id).await?;
    Ok(Json(team))
}

pub async fn delete_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let pool = state.db.pool();
    let upload = submissions::get_submission_for_team(pool, &id)
        .await?
        .and_then(|s| s.file_url);
    team_service::delete_team(pool, auth.user(), &id).await?;
    discard_upload(state.files.as_ref(), upload.as_deref()).await;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn assign_mentor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<AssignMentorRequest>,
) -> AppResult<Json<Team>> {
    auth.require_organizer()?;
    let team = team_service::assign_mentor(state.db.pool(), &id, &req.mentor_id).await?;
    Ok(Json(team))
}
