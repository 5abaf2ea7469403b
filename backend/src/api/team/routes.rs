//! Defines the HTTP routes for team formation and management.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    assign_mentor, create_team, delete_team, get_team, join_team, leave_team, list_teams, my_team,
    regenerate_join_code,
};
use crate::state::AppState;

pub fn team_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teams).post(create_team))
        .route("/mine", get(my_team))
        .route("/join", post(join_team))
        .route("/leave", post(leave_team))
        .route("/{id}", get(get_team).delete(delete_team))
        .route("/{id}/join-code", post(regenerate_join_code))
        .route("/{id}/mentor", put(assign_mentor))
}
