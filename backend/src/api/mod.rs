//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the portal's API domains,
//! such as teams, judging and messaging, excluding core authentication routes
//! which are handled separately in `auth`.

pub mod coordinator;
pub mod judge;
pub mod mentor;
pub mod message;
pub mod notification;
pub mod submission;
pub mod survey;
pub mod team;
pub mod upload;
pub mod user;

use axum::Router;

use crate::auth::auth_router;
use crate::state::AppState;

/// Every JSON route, to be nested under `/api`.
pub fn api_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_router())
        .nest("/users", user::routes::user_router())
        .nest("/teams", team::routes::team_router())
        .nest("/submissions", submission::routes::submission_router())
        .nest("/judge", judge::routes::judge_router())
        .nest("/mentor", mentor::routes::mentor_router())
        .nest("/coordinator", coordinator::routes::coordinator_router())
        .nest("/notifications", notification::routes::notification_router())
        .nest("/messages", message::routes::message_router())
        .nest("/surveys", survey::routes::survey_router())
        .nest("/uploads", upload::routes::upload_router(max_upload_bytes))
}
