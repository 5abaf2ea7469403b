//! Judge evaluation queries and score aggregation.

use sqlx::SqlitePool;

use crate::database::models::{Evaluation, TeamScore};
use crate::database::{new_id, now};
use crate::errors::DbResult;

pub struct NewEvaluation<'a> {
    pub submission_id: &'a str,
    pub judge_id: &'a str,
    pub innovation: f64,
    pub execution: f64,
    pub presentation: f64,
    pub comments: Option<&'a str>,
}

/// Record a judge's scores, replacing any earlier scores for the same submission.
pub async fn upsert_evaluation(
    pool: &SqlitePool,
    new: NewEvaluation<'_>,
) -> DbResult<(Evaluation, bool)> {
    let id = new_id();
    let ts = now();

    let evaluation = sqlx::query_as::<_, Evaluation>(
        r#"
        INSERT INTO evaluations
            (id, submission_id, judge_id, innovation, execution, presentation, comments, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (submission_id, judge_id) DO UPDATE SET
            innovation = excluded.innovation,
            execution = excluded.execution,
            presentation = excluded.presentation,
            comments = excluded.comments,
            updated_at = excluded.updated_at
        RETURNING *
        "#,
    )
    .bind(&id)
    .bind(new.submission_id)
    .bind(new.judge_id)
    .bind(new.innovation)
    .bind(new.execution)
    .bind(new.presentation)
    .bind(new.comments)
    .bind(ts)
    .bind(ts)
    .fetch_one(pool)
    .await?;

    let created = evaluation.id == id;
    Ok((evaluation, created))
}

pub async fn list_for_judge(pool: &SqlitePool, judge_id: &str) -> DbResult<Vec<Evaluation>> {
    let evaluations = sqlx::query_as::<_, Evaluation>(
        "SELECT * FROM evaluations WHERE judge_id = ? ORDER BY updated_at DESC, rowid DESC",
    )
    .bind(judge_id)
    .fetch_all(pool)
    .await?;
    Ok(evaluations)
}

pub async fn list_for_submission(
    pool: &SqlitePool,
    submission_id: &str,
) -> DbResult<Vec<Evaluation>> {
    let evaluations = sqlx::query_as::<_, Evaluation>(
        "SELECT * FROM evaluations WHERE submission_id = ? ORDER BY created_at, rowid",
    )
    .bind(submission_id)
    .fetch_all(pool)
    .await?;
    Ok(evaluations)
}

/// Average total score per submitted team. Unscored submissions average 0.
/// Averages are rounded to six decimals so float noise cannot split a tie.
///
/// Rows come back in leaderboard order: average desc, evaluation count desc,
/// team name asc.
pub async fn team_scores(pool: &SqlitePool) -> DbResult<Vec<TeamScore>> {
    let scores = sqlx::query_as::<_, TeamScore>(
        r#"
        SELECT t.id AS team_id,
               t.name AS team_name,
               s.id AS submission_id,
               COALESCE(ROUND(AVG(e.innovation + e.execution + e.presentation), 6), 0.0) AS average_score,
               COUNT(e.id) AS evaluation_count
        FROM submissions s
        JOIN teams t ON t.id = s.team_id
        LEFT JOIN evaluations e ON e.submission_id = s.id
        GROUP BY t.id, t.name, s.id
        ORDER BY average_score DESC, evaluation_count DESC, t.name COLLATE NOCASE ASC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(scores)
}

pub async fn count_evaluations(pool: &SqlitePool) -> DbResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM evaluations")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
