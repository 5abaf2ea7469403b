//! Defines the HTTP routes for surveys.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{close_survey, create_survey, get_survey, list_surveys, respond, results};
use crate::state::AppState;

pub fn survey_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_surveys).post(create_survey))
        .route("/{id}", get(get_survey))
        .route("/{id}/responses", post(respond))
        .route("/{id}/close", post(close_survey))
        .route("/{id}/results", get(results))
}
