//! Survey and survey response queries.

use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::database::models::{Survey, SurveyResponse};
use crate::database::{new_id, now};
use crate::errors::DbResult;

pub async fn create_survey(
    pool: &SqlitePool,
    title: &str,
    description: Option<&str>,
    questions: &[String],
    created_by: &str,
) -> DbResult<Survey> {
    let survey = sqlx::query_as::<_, Survey>(
        r#"
        INSERT INTO surveys (id, title, description, questions, is_open, created_by, created_at)
        VALUES (?, ?, ?, ?, 1, ?, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(title)
    .bind(description)
    .bind(Json(questions))
    .bind(created_by)
    .bind(now())
    .fetch_one(pool)
    .await?;
    Ok(survey)
}

pub async fn get_survey(pool: &SqlitePool, id: &str) -> DbResult<Option<Survey>> {
    let survey = sqlx::query_as::<_, Survey>("SELECT * FROM surveys WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(survey)
}

/// Surveys, newest first.
pub async fn list_surveys(pool: &SqlitePool) -> DbResult<Vec<Survey>> {
    let surveys =
        sqlx::query_as::<_, Survey>("SELECT * FROM surveys ORDER BY created_at DESC, rowid DESC")
            .fetch_all(pool)
            .await?;
    Ok(surveys)
}

pub async fn close_survey(pool: &SqlitePool, id: &str) -> DbResult<Option<Survey>> {
    let survey =
        sqlx::query_as::<_, Survey>("UPDATE surveys SET is_open = 0 WHERE id = ? RETURNING *")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(survey)
}

/// Store a user's answers, replacing any earlier response to the same survey.
pub async fn upsert_response(
    pool: &SqlitePool,
    survey_id: &str,
    user_id: &str,
    answers: &[String],
) -> DbResult<SurveyResponse> {
    let response = sqlx::query_as::<_, SurveyResponse>(
        r#"
        INSERT INTO survey_responses (id, survey_id, user_id, answers, created_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (survey_id, user_id) DO UPDATE SET
            answers = excluded.answers,
            created_at = excluded.created_at
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(survey_id)
    .bind(user_id)
    .bind(Json(answers))
    .bind(now())
    .fetch_one(pool)
    .await?;
    Ok(response)
}

pub async fn list_responses(pool: &SqlitePool, survey_id: &str) -> DbResult<Vec<SurveyResponse>> {
    let responses = sqlx::query_as::<_, SurveyResponse>(
        "SELECT * FROM survey_responses WHERE survey_id = ? ORDER BY created_at, rowid",
    )
    .bind(survey_id)
    .fetch_all(pool)
    .await?;
    Ok(responses)
}
