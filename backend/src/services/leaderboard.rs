//! Leaderboard ranking over aggregated evaluation scores.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::models::TeamScore;
use crate::database::queries::evaluations;
use crate::errors::AppResult;

/// Averages closer than this count as equal.
const SCORE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    #[serde(flatten)]
    pub score: TeamScore,
}

/// Competition ranking ("1224"): equal averages share a rank and the next
/// distinct average skips ahead. Input must already be sorted.
pub fn rank(scores: Vec<TeamScore>) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(scores.len());

    for (position, score) in scores.into_iter().enumerate() {
        let rank = match entries.last() {
            Some(prev) if (prev.score.average_score - score.average_score).abs() < SCORE_EPSILON => {
                prev.rank
            }
            _ => position + 1,
        };
        entries.push(LeaderboardEntry { rank, score });
    }

    entries
}

pub async fn leaderboard(pool: &SqlitePool) -> AppResult<Vec<LeaderboardEntry>> {
    let scores = evaluations::team_scores(pool).await?;
    Ok(rank(scores))
}
