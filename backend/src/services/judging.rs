//! Score validation and recording for judges.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, instrument};

use crate::database::models::{Evaluation, User};
use crate::database::queries::evaluations::{self, NewEvaluation};
use crate::database::queries::submissions;
use crate::errors::{AppError, AppResult};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;
const MAX_COMMENT_LEN: usize = 4000;

/// The three sub-scores a judge gives a submission.
#[derive(Debug, Clone, Copy)]
pub struct Scores {
    pub innovation: f64,
    pub execution: f64,
    pub presentation: f64,
}

impl Scores {
    pub fn validate(&self) -> AppResult<()> {
        let in_range = |s: f64| s.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&s);
        if [self.innovation, self.execution, self.presentation]
            .into_iter()
            .all(in_range)
        {
            Ok(())
        } else {
            Err(AppError::bad_request("Scores must be between 0 and 10"))
        }
    }
}

/// An evaluation with its summed score, as returned to clients.
#[derive(Debug, Serialize)]
pub struct ScoredEvaluation {
    #[serde(flatten)]
    pub evaluation: Evaluation,
    pub total: f64,
}

impl From<Evaluation> for ScoredEvaluation {
    fn from(evaluation: Evaluation) -> Self {
        let total = evaluation.total();
        Self { evaluation, total }
    }
}

#[instrument(skip(pool, judge, comments), fields(judge_id = %judge.id))]
pub async fn evaluate(
    pool: &SqlitePool,
    judge: &User,
    submission_id: &str,
    scores: Scores,
    comments: Option<&str>,
) -> AppResult<(ScoredEvaluation, bool)> {
    scores.validate()?;

    let comments = comments.map(str::trim).filter(|c| !c.is_empty());
    if comments.is_some_and(|c| c.chars().count() > MAX_COMMENT_LEN) {
        return Err(AppError::bad_request(format!(
            "Comments must be at most {MAX_COMMENT_LEN} characters"
        )));
    }

    if submissions::get_submission(pool, submission_id).await?.is_none() {
        return Err(AppError::not_found("Submission not found"));
    }

    let (evaluation, created) = evaluations::upsert_evaluation(
        pool,
        NewEvaluation {
            submission_id,
            judge_id: &judge.id,
            innovation: scores.innovation,
            execution: scores.execution,
            presentation: scores.presentation,
            comments,
        },
    )
    .await?;

    info!(evaluation_id = %evaluation.id, created, "evaluation saved");
    Ok((evaluation.into(), created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;
    use crate::database::queries::submissions::tests::team_with_submission;
    use crate::database::queries::test_support;

    fn scores(innovation: f64, execution: f64, presentation: f64) -> Scores {
        Scores {
            innovation,
            execution,
            presentation,
        }
    }

    #[test]
    fn test_score_bounds() {
        assert!(scores(0.0, 10.0, 5.5).validate().is_ok());
        assert!(scores(-0.1, 5.0, 5.0).validate().is_err());
        assert!(scores(5.0, 10.01, 5.0).validate().is_err());
        assert!(scores(5.0, 5.0, f64::NAN).validate().is_err());
        assert!(scores(f64::INFINITY, 5.0, 5.0).validate().is_err());
    }

    #[tokio::test]
    async fn test_evaluate_unknown_submission() {
        let db = test_support::db().await;
        let judge = test_support::user(&db, "Jude", Role::Judge).await;

        let err = evaluate(db.pool(), &judge, "missing", scores(5.0, 5.0, 5.0), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_evaluate_twice_updates() {
        let db = test_support::db().await;
        let ada = test_support::user(&db, "Ada", Role::Student).await;
        let judge = test_support::user(&db, "Jude", Role::Judge).await;
        let submission = team_with_submission(&db, &ada, "Alpha").await;

        let (first, created) = evaluate(db.pool(), &judge, &submission.id, scores(5.0, 5.0, 5.0), Some("ok"))
            .await
            .unwrap();
        assert!(created);
        assert_eq!(first.total, 15.0);

        let (second, created) = evaluate(db.pool(), &judge, &submission.id, scores(9.0, 8.0, 7.0), None)
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(second.evaluation.id, first.evaluation.id);
        assert_eq!(second.total, 24.0);
        assert!(second.evaluation.comments.is_none());
    }
}
