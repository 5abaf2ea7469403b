//! Handler functions for project submission endpoints.
//!
//! A team has one submission; posting again replaces it. Staff can browse
//! every submission while students only see their own team's.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::auth::AuthUser;
use crate::database::models::{Submission, SubmissionSummary};
use crate::database::queries::{submissions, teams};
use crate::errors::{AppError, AppResult};
use crate::services::submissions::{self as submission_service, SubmissionInput};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub title: String,
    pub description: Option<String>,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub file_url: Option<String>,
}

pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SubmitRequest>,
) -> AppResult<(StatusCode, Json<Submission>)> {
    let input = SubmissionInput {
        title: &req.title,
        description: req.description.as_deref(),
        repo_url: req.repo_url.as_deref(),
        demo_url: req.demo_url.as_deref(),
        file_url: req.file_url.as_deref(),
    };
    let pool = state.db.pool();
    let previous_upload = submission_service::current_upload(pool, auth.user()).await?;
    let (submission, created) =
        submission_service::upsert_for_user(pool, auth.user(), input).await?;

    if previous_upload.is_some() && previous_upload != submission.file_url {
        submission_service::discard_upload(state.files.as_ref(), previous_upload.as_deref()).await;
    }

    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(submission)))
}

pub async fn my_submission(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Submission>> {
    let pool = state.db.pool();
    let team = teams::team_for_user(pool, auth.id())
        .await?
        .ok_or_else(|| AppError::not_found("You are not in a team"))?;
    let submission = submissions::get_submission_for_team(pool, &team.id)
        .await?
        .ok_or_else(|| AppError::not_found("Your team has not submitted yet"))?;
    Ok(Json(submission))
}

pub async fn list_submissions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<SubmissionSummary>>> {
    auth.require_staff()?;
    Ok(Json(submissions::list_submissions(state.db.pool()).await?))
}

pub async fn get_submission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Submission>> {
    let pool = state.db.pool();
    let submission = submissions::get_submission(pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Submission not found"))?;

    if !submission_service::can_view(pool, auth.user(), &submission).await? {
        return Err(AppError::forbidden("You cannot view this submission"));
    }
    Ok(Json(submission))
}

pub async fn delete_submission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    auth.require_organizer()?;
    let pool = state.db.pool();
    let submission = submissions::get_submission(pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Submission not found"))?;
    if !submissions::delete_submission(pool, &id).await? {
        return Err(AppError::not_found("Submission not found"));
    }
    submission_service::discard_upload(state.files.as_ref(), submission.file_url.as_deref()).await;
    info!(submission_id = %id, deleted_by = %auth.id(), "submission deleted");
    Ok(StatusCode::NO_CONTENT)
}
