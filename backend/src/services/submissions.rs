//! Submission rules: one per team, members only, sane links.

use adapters::FileAdapter;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument, warn};

use super::notifier;
use crate::database::models::{Submission, User};
use crate::database::queries::submissions::{self, NewSubmission};
use crate::database::queries::teams;
use crate::errors::{AppError, AppResult};

const MAX_TITLE_LEN: usize = 120;
const UPLOAD_PREFIX: &str = "/uploads/";
const ALLOWED_URL_PREFIXES: [&str; 3] = ["http://", "https://", UPLOAD_PREFIX];

/// Fields a team sends when (re-)submitting.
#[derive(Debug, Default)]
pub struct SubmissionInput<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub repo_url: Option<&'a str>,
    pub demo_url: Option<&'a str>,
    pub file_url: Option<&'a str>,
}

fn clean(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn check_url(field: &str, value: Option<&str>) -> AppResult<()> {
    match value {
        Some(url) if !ALLOWED_URL_PREFIXES.iter().any(|p| url.starts_with(p)) => Err(
            AppError::bad_request(format!("{field} must be an http(s) or uploaded file link")),
        ),
        _ => Ok(()),
    }
}

#[instrument(skip(pool, user, input), fields(user_id = %user.id))]
pub async fn upsert_for_user(
    pool: &SqlitePool,
    user: &User,
    input: SubmissionInput<'_>,
) -> AppResult<(Submission, bool)> {
    let team = teams::team_for_user(pool, &user.id)
        .await?
        .ok_or_else(|| AppError::bad_request("You must be in a team to submit"))?;

    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::bad_request("Title is required"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::bad_request(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }

    let repo_url = clean(input.repo_url);
    let demo_url = clean(input.demo_url);
    let file_url = clean(input.file_url);
    check_url("repo_url", repo_url)?;
    check_url("demo_url", demo_url)?;
    check_url("file_url", file_url)?;

    let (submission, created) = submissions::upsert_submission(
        pool,
        NewSubmission {
            team_id: &team.id,
            title,
            description: clean(input.description),
            repo_url,
            demo_url,
            file_url,
            submitted_by: &user.id,
        },
    )
    .await?;

    info!(submission_id = %submission.id, created, "submission saved");

    let mut others = teams::member_ids(pool, &team.id).await?;
    others.retain(|id| id != &user.id);
    let verb = if created { "submitted" } else { "updated" };
    notifier::notify_many(
        pool,
        &others,
        "Team submission",
        &format!("{} {} \"{}\"", user.name, verb, submission.title),
    )
    .await;

    Ok((submission, created))
}

/// The uploaded file currently attached to `user`'s team submission, if any.
pub async fn current_upload(pool: &SqlitePool, user: &User) -> AppResult<Option<String>> {
    let Some(team) = teams::team_for_user(pool, &user.id).await? else {
        return Ok(None);
    };
    let submission = submissions::get_submission_for_team(pool, &team.id).await?;
    Ok(submission
        .and_then(|s| s.file_url)
        .filter(|url| url.starts_with(UPLOAD_PREFIX)))
}

/// Remove a stored upload that no submission points at any more.
///
/// Failures are logged only; a stray file never fails the request.
pub async fn discard_upload(files: &dyn FileAdapter, file_url: Option<&str>) {
    let Some(key) = file_url.and_then(|url| url.strip_prefix(UPLOAD_PREFIX)) else {
        return;
    };
    match files.delete(key).await {
        Ok(true) => debug!(key, "discarded upload"),
        Ok(false) => debug!(key, "upload already gone"),
        Err(err) => warn!(key, error = %err, "failed to discard upload"),
    }
}

/// Staff see everything; students only their own team's submission.
pub async fn can_view(pool: &SqlitePool, user: &User, submission: &Submission) -> AppResult<bool> {
    if user.role.is_staff() {
        return Ok(true);
    }
    Ok(teams::is_member(pool, &submission.team_id, &user.id).await?)
}
