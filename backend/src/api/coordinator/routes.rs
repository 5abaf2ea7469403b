//! Defines the HTTP routes for event organizers: schedule, announcements,
//! leaderboard and statistics.

use axum::routing::{delete, get, post, put};
use axum::Router;

use super::announcements::{create_announcement, delete_announcement, list_announcements, mark_read};
use super::handlers::{leaderboard, stats};
use super::schedule::{create_event, delete_event, list_events, update_event};
use crate::state::AppState;

pub fn coordinator_router() -> Router<AppState> {
    Router::new()
        .route("/schedule", get(list_events).post(create_event))
        .route("/schedule/{id}", put(update_event).delete(delete_event))
        .route("/announcements", get(list_announcements).post(create_announcement))
        .route("/announcements/{id}", delete(delete_announcement))
        .route("/announcements/{id}/read", post(mark_read))
        .route("/leaderboard", get(leaderboard))
        .route("/stats", get(stats))
}
