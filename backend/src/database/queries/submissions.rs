//! Project submission queries. Each team has at most one submission.

use sqlx::SqlitePool;

use crate::database::models::{Submission, SubmissionSummary};
use crate::database::{new_id, now};
use crate::errors::DbResult;

const SUMMARY_SELECT: &str = r#"
    SELECT s.id, s.team_id, t.name AS team_name, s.title, s.repo_url, s.demo_url, s.file_url,
           (SELECT COUNT(*) FROM evaluations e WHERE e.submission_id = s.id) AS evaluation_count,
           s.updated_at
    FROM submissions s
    JOIN teams t ON t.id = s.team_id
"#;

pub struct NewSubmission<'a> {
    pub team_id: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub repo_url: Option<&'a str>,
    pub demo_url: Option<&'a str>,
    pub file_url: Option<&'a str>,
    pub submitted_by: &'a str,
}

/// Create or replace the team's submission.
///
/// Returns the stored row and whether it was newly created. Re-submitting
/// keeps the original id and created_at.
pub async fn upsert_submission(
    pool: &SqlitePool,
    new: NewSubmission<'_>,
) -> DbResult<(Submission, bool)> {
    let id = new_id();
    let ts = now();

    let submission = sqlx::query_as::<_, Submission>(
        r#"
        INSERT INTO submissions
            (id, team_id, title, description, repo_url, demo_url, file_url, submitted_by, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (team_id) DO UPDATE SET
            title = excluded.title,
            description = excluded.description,
            repo_url = excluded.repo_url,
            demo_url = excluded.demo_url,
            file_url = excluded.file_url,
            submitted_by = excluded.submitted_by,
            updated_at = excluded.updated_at
        RETURNING *
        "#,
    )
    .bind(&id)
    .bind(new.team_id)
    .bind(new.title)
    .bind(new.description)
    .bind(new.repo_url)
    .bind(new.demo_url)
    .bind(new.file_url)
    .bind(new.submitted_by)
    .bind(ts)
    .bind(ts)
    .fetch_one(pool)
    .await?;

    let created = submission.id == id;
    Ok((submission, created))
}

pub async fn get_submission(pool: &SqlitePool, id: &str) -> DbResult<Option<Submission>> {
    let submission = sqlx::query_as::<_, Submission>("SELECT * FROM submissions WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(submission)
}

pub async fn get_submission_for_team(
    pool: &SqlitePool,
    team_id: &str,
) -> DbResult<Option<Submission>> {
    let submission = sqlx::query_as::<_, Submission>("SELECT * FROM submissions WHERE team_id = ?")
        .bind(team_id)
        .fetch_optional(pool)
        .await?;
    Ok(submission)
}

/// All submissions, most recently updated first.
pub async fn list_submissions(pool: &SqlitePool) -> DbResult<Vec<SubmissionSummary>> {
    let sql = format!("{SUMMARY_SELECT} ORDER BY s.updated_at DESC, s.rowid DESC");
    let submissions = sqlx::query_as::<_, SubmissionSummary>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(submissions)
}

/// Submissions the given judge has not scored yet, oldest first.
pub async fn list_pending_for_judge(
    pool: &SqlitePool,
    judge_id: &str,
) -> DbResult<Vec<SubmissionSummary>> {
    let sql = format!(
        "{SUMMARY_SELECT} WHERE NOT EXISTS \
         (SELECT 1 FROM evaluations e WHERE e.submission_id = s.id AND e.judge_id = ?) \
         ORDER BY s.created_at, s.rowid"
    );
    let submissions = sqlx::query_as::<_, SubmissionSummary>(&sql)
        .bind(judge_id)
        .fetch_all(pool)
        .await?;
    Ok(submissions)
}

pub async fn delete_submission(pool: &SqlitePool, id: &str) -> DbResult<bool> {
    let result = sqlx::query("DELETE FROM submissions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
