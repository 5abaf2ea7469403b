//! Handler functions for feedback surveys.
//!
//! Organizers create and close surveys and read the results. Everyone else
//! answers them, once per survey; answering again replaces the old response.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthUser;
use crate::database::models::{Survey, SurveyResponse};
use crate::database::queries::surveys;
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSurveyRequest {
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub answers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SurveyResults {
    pub survey: Survey,
    pub responses: Vec<SurveyResponse>,
}

fn clean_questions(questions: &[String]) -> AppResult<Vec<String>> {
    if questions.is_empty() {
        return Err(AppError::bad_request("A survey needs at least one question"));
    }
    questions
        .iter()
        .map(|q| match q.trim() {
            "" => Err(AppError::bad_request("Questions cannot be blank")),
            q => Ok(q.to_string()),
        })
        .collect()
}

async fn find_survey(state: &AppState, id: &str) -> AppResult<Survey> {
    surveys::get_survey(state.db.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found("Survey not found"))
}

pub async fn create_survey(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateSurveyRequest>,
) -> AppResult<(StatusCode, Json<Survey>)> {
    auth.require_organizer()?;
    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::bad_request("Title is required"));
    }
    let questions = clean_questions(&req.questions)?;
    let description = req.description.as_deref().map(str::trim).filter(|d| !d.is_empty());

    let survey =
        surveys::create_survey(state.db.pool(), title, description, &questions, auth.id()).await?;
    info!(survey_id = %survey.id, questions = questions.len(), "survey created");
    Ok((StatusCode::CREATED, Json(survey)))
}

pub async fn list_surveys(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<Survey>>> {
    Ok(Json(surveys::list_surveys(state.db.pool()).await?))
}

pub async fn get_survey(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Survey>> {
    Ok(Json(find_survey(&state, &id).await?))
}

pub async fn respond(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<RespondRequest>,
) -> AppResult<Json<SurveyResponse>> {
    let survey = find_survey(&state, &id).await?;
    if !survey.is_open {
        return Err(AppError::bad_request("Survey is closed"));
    }
    if req.answers.len() != survey.questions.len() {
        return Err(AppError::bad_request(format!(
            "Expected {} answers, got {}",
            survey.questions.len(),
            req.answers.len()
        )));
    }

    let response =
        surveys::upsert_response(state.db.pool(), &survey.id, auth.id(), &req.answers).await?;
    Ok(Json(response))
}

pub async fn close_survey(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Survey>> {
    auth.require_organizer()?;
    let survey = surveys::close_survey(state.db.pool(), &id)
        .await?
        .ok_or_else(|| AppError::not_found("Survey not found"))?;
    Ok(Json(survey))
}

pub async fn results(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<SurveyResults>> {
    auth.require_organizer()?;
    let survey = find_survey(&state, &id).await?;
    let responses = surveys::list_responses(state.db.pool(), &survey.id).await?;
    Ok(Json(SurveyResults { survey, responses }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_are_trimmed() {
        let questions = vec![" How was it? ".to_string(), "Would you return?".to_string()];
        assert_eq!(
            clean_questions(&questions).unwrap(),
            vec!["How was it?", "Would you return?"]
        );
    }

    #[test]
    fn test_empty_or_blank_questions_rejected() {
        assert!(clean_questions(&[]).is_err());
        assert!(clean_questions(&["ok".to_string(), "  ".to_string()]).is_err());
    }
}
