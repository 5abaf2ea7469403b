//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Some are joined read models (team listings with member
//! counts, leaderboard rows) rather than single tables. API request payloads
//! live next to their handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::auth::models::Role;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub firebase_uid: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub join_code: String,
    pub capacity: i64,
    pub leader_id: String,
    pub mentor_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Team row plus its current head count, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i64,
    pub leader_id: String,
    pub mentor_id: Option<String>,
    pub member_count: i64,
    pub created_at: DateTime<Utc>,
}

/// A member as shown on a team page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamMember {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamDetail {
    #[serde(flatten)]
    pub team: Team,
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Submission {
    pub id: String,
    pub team_id: String,
    pub title: String,
    pub description: Option<String>,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub file_url: Option<String>,
    pub submitted_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submission joined with its team name and how many judges scored it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubmissionSummary {
    pub id: String,
    pub team_id: String,
    pub team_name: String,
    pub title: String,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub file_url: Option<String>,
    pub evaluation_count: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Evaluation {
    pub id: String,
    pub submission_id: String,
    pub judge_id: String,
    pub innovation: f64,
    pub execution: f64,
    pub presentation: f64,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Evaluation {
    pub fn total(&self) -> f64 {
        self.innovation + self.execution + self.presentation
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: String,
    pub team_id: String,
    pub mentor_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Announcement {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Announcement as seen by one user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnnouncementView {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Survey {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub questions: Json<Vec<String>>,
    pub is_open: bool,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SurveyResponse {
    pub id: String,
    pub survey_id: String,
    pub user_id: String,
    pub answers: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// One line of the leaderboard, before ranks are assigned.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamScore {
    pub team_id: String,
    pub team_name: String,
    pub submission_id: String,
    pub average_score: f64,
    pub evaluation_count: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleCount {
    pub role: Role,
    pub count: i64,
}
