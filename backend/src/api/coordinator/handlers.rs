//! Handler functions for the leaderboard and event statistics.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::auth::AuthUser;
use crate::database::models::RoleCount;
use crate::database::queries::{evaluations, stats};
use crate::errors::AppResult;
use crate::services::leaderboard::{self, LeaderboardEntry};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub users_by_role: Vec<RoleCount>,
    pub total_users: i64,
    pub teams: i64,
    pub submissions: i64,
    pub evaluations: i64,
}

pub async fn leaderboard(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<LeaderboardEntry>>> {
    Ok(Json(leaderboard::leaderboard(state.db.pool()).await?))
}

pub async fn stats(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<StatsResponse>> {
    auth.require_organizer()?;
    let pool = state.db.pool();

    let users_by_role = stats::users_per_role(pool).await?;
    let total_users = users_by_role.iter().map(|r| r.count).sum();

    Ok(Json(StatsResponse {
        users_by_role,
        total_users,
        teams: stats::count_teams(pool).await?,
        submissions: stats::count_submissions(pool).await?,
        evaluations: evaluations::count_evaluations(pool).await?,
    }))
}
