//! Defines the HTTP routes for mentors and team feedback.

use axum::routing::get;
use axum::Router;

use super::handlers::{add_feedback, my_teams, team_feedback};
use crate::state::AppState;

pub fn mentor_router() -> Router<AppState> {
    Router::new()
        .route("/teams", get(my_teams))
        .route("/teams/{id}/feedback", get(team_feedback).post(add_feedback))
}
