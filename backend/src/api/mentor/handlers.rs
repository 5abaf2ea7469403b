//! Handler functions for mentor endpoints.
//!
//! Mentors see the teams assigned to them and leave written feedback.
//! Organizers may write feedback for any team.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::auth::{AuthUser, Role};
use crate::database::models::{Feedback, Team, TeamSummary};
use crate::database::queries::{feedback, teams};
use crate::errors::{AppError, AppResult};
use crate::services::notifier;
use crate::state::AppState;

const MAX_FEEDBACK_LEN: usize = 4000;

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub body: String,
}

async fn find_team(state: &AppState, id: &str) -> AppResult<Team> {
    teams::get_team(state.db.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found("Team not found"))
}

pub async fn my_teams(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<TeamSummary>>> {
    auth.require(&[Role::Mentor])?;
    let teams = teams::list_teams_for_mentor(state.db.pool(), auth.id()).await?;
    Ok(Json(teams))
}

pub async fn add_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<String>,
    Json(req): Json<FeedbackRequest>,
) -> AppResult<(StatusCode, Json<Feedback>)> {
    auth.require(&[Role::Mentor, Role::Coordinator, Role::Admin])?;
    let team = find_team(&state, &team_id).await?;

    let assigned = team.mentor_id.as_deref() == Some(auth.id());
    if auth.role() == Role::Mentor && !assigned {
        return Err(AppError::forbidden("You are not this team's mentor"));
    }

    let body = req.body.trim();
    if body.is_empty() {
        return Err(AppError::bad_request("Feedback cannot be empty"));
    }
    if body.chars().count() > MAX_FEEDBACK_LEN {
        return Err(AppError::bad_request(format!(
            "Feedback must be at most {MAX_FEEDBACK_LEN} characters"
        )));
    }

    let pool = state.db.pool();
    let entry = feedback::create_feedback(pool, &team.id, auth.id(), body).await?;
    info!(team_id = %team.id, feedback_id = %entry.id, "feedback added");

    let members = teams::member_ids(pool, &team.id).await?;
    notifier::notify_many(
        pool,
        &members,
        "New mentor feedback",
        &format!("{} left feedback for {}", auth.user().name, team.name),
    )
    .await;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn team_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<String>,
) -> AppResult<Json<Vec<Feedback>>> {
    let team = find_team(&state, &team_id).await?;
    let pool = state.db.pool();

    let allowed = auth.role().is_staff()
        || team.mentor_id.as_deref() == Some(auth.id())
        || teams::is_member(pool, &team.id, auth.id()).await?;
    if !allowed {
        return Err(AppError::forbidden("You cannot view this team's feedback"));
    }

    Ok(Json(feedback::list_for_team(pool, &team.id).await?))
}
