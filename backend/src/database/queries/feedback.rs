//! Mentor feedback queries.

use sqlx::SqlitePool;

use crate::database::models::Feedback;
use crate::database::{new_id, now};
use crate::errors::DbResult;

pub async fn create_feedback(
    pool: &SqlitePool,
    team_id: &str,
    mentor_id: &str,
    body: &str,
) -> DbResult<Feedback> {
    let feedback = sqlx::query_as::<_, Feedback>(
        r#"
        INSERT INTO feedback (id, team_id, mentor_id, body, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(team_id)
    .bind(mentor_id)
    .bind(body)
    .bind(now())
    .fetch_one(pool)
    .await?;
    Ok(feedback)
}

/// Feedback for a team, newest first.
pub async fn list_for_team(pool: &SqlitePool, team_id: &str) -> DbResult<Vec<Feedback>> {
    let feedback = sqlx::query_as::<_, Feedback>(
        "SELECT * FROM feedback WHERE team_id = ? ORDER BY created_at DESC, rowid DESC",
    )
    .bind(team_id)
    .fetch_all(pool)
    .await?;
    Ok(feedback)
}
