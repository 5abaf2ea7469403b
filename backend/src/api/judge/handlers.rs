//! Handler functions for judging endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::auth::{AuthUser, Role};
use crate::database::models::SubmissionSummary;
use crate::database::queries::{evaluations, submissions};
use crate::errors::{AppError, AppResult};
use crate::services::judging::{self, ScoredEvaluation, Scores};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub submission_id: String,
    pub innovation: f64,
    pub execution: f64,
    pub presentation: f64,
    pub comments: Option<String>,
}

pub async fn evaluate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<EvaluateRequest>,
) -> AppResult<(StatusCode, Json<ScoredEvaluation>)> {
    auth.require(&[Role::Judge])?;
    let scores = Scores {
        innovation: req.innovation,
        execution: req.execution,
        presentation: req.presentation,
    };
    let (evaluation, created) = judging::evaluate(
        state.db.pool(),
        auth.user(),
        &req.submission_id,
        scores,
        req.comments.as_deref(),
    )
    .await?;

    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(evaluation)))
}

pub async fn my_evaluations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<ScoredEvaluation>>> {
    auth.require(&[Role::Judge])?;
    let rows = evaluations::list_for_judge(state.db.pool(), auth.id()).await?;
    Ok(Json(rows.into_iter().map(ScoredEvaluation::from).collect()))
}

pub async fn pending_submissions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<SubmissionSummary>>> {
    auth.require(&[Role::Judge])?;
    let pending = submissions::list_pending_for_judge(state.db.pool(), auth.id()).await?;
    Ok(Json(pending))
}

pub async fn submission_evaluations(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<ScoredEvaluation>>> {
    auth.require_organizer()?;
    let pool = state.db.pool();
    if submissions::get_submission(pool, &id).await?.is_none() {
        return Err(AppError::not_found("Submission not found"));
    }
    let rows = evaluations::list_for_submission(pool, &id).await?;
    Ok(Json(rows.into_iter().map(ScoredEvaluation::from).collect()))
}
