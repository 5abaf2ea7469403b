//! Team formation rules: creation, join codes, capacity and leadership.

use rand::Rng;
use sqlx::SqlitePool;
use tracing::{info, instrument};

use super::notifier;
use crate::auth::models::Role;
use crate::database::models::{Team, TeamDetail, User};
use crate::database::queries::teams::{self, JoinOutcome, LeaveOutcome, NewTeam};
use crate::database::queries::users;
use crate::errors::{AppError, AppResult};

pub const DEFAULT_CAPACITY: i64 = 4;
pub const MAX_CAPACITY: i64 = 10;
pub const JOIN_CODE_LEN: usize = 8;
const JOIN_CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const JOIN_CODE_ATTEMPTS: usize = 5;
const MAX_NAME_LEN: usize = 80;

/// Random join code without look-alike characters (no 0/O, 1/I).
pub fn generate_join_code() -> String {
    let mut rng = rand::rng();
    (0..JOIN_CODE_LEN)
        .map(|_| JOIN_CODE_CHARSET[rng.random_range(0..JOIN_CODE_CHARSET.len())] as char)
        .collect()
}

/// Join codes are matched case-insensitively.
pub fn normalize_join_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

async fn unused_join_code(pool: &SqlitePool) -> AppResult<String> {
    for _ in 0..JOIN_CODE_ATTEMPTS {
        let code = generate_join_code();
        if !teams::join_code_exists(pool, &code).await? {
            return Ok(code);
        }
    }
    Err(AppError::Internal(
        "could not generate a unique join code".to_string(),
    ))
}

#[instrument(skip(pool, leader, description), fields(leader_id = %leader.id))]
pub async fn create_team(
    pool: &SqlitePool,
    leader: &User,
    name: &str,
    description: Option<&str>,
    capacity: Option<i64>,
) -> AppResult<Team> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("Team name is required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::bad_request(format!(
            "Team name must be at most {MAX_NAME_LEN} characters"
        )));
    }

    let capacity = capacity.unwrap_or(DEFAULT_CAPACITY);
    if !(1..=MAX_CAPACITY).contains(&capacity) {
        return Err(AppError::bad_request(format!(
            "Capacity must be between 1 and {MAX_CAPACITY}"
        )));
    }

    if teams::team_name_exists(pool, name).await? {
        return Err(AppError::bad_request("Team name already exists"));
    }
    if teams::team_for_user(pool, &leader.id).await?.is_some() {
        return Err(AppError::bad_request("You are already in a team"));
    }

    let join_code = unused_join_code(pool).await?;
    let description = description.map(str::trim).filter(|d| !d.is_empty());

    let team = teams::create_team(
        pool,
        NewTeam {
            name,
            description,
            capacity,
            join_code: &join_code,
            leader_id: &leader.id,
        },
    )
    .await
    .map_err(|err| {
        if err.violates_unique("teams.name") {
            AppError::bad_request("Team name already exists")
        } else {
            err.into()
        }
    })?;

    info!(team_id = %team.id, "team created");
    Ok(team)
}

#[instrument(skip(pool, user), fields(user_id = %user.id))]
pub async fn join_team(pool: &SqlitePool, user: &User, join_code: &str) -> AppResult<Team> {
    let code = normalize_join_code(join_code);
    if code.is_empty() {
        return Err(AppError::bad_request("Join code is required"));
    }

    let team = teams::get_team_by_join_code(pool, &code)
        .await?
        .ok_or_else(|| AppError::not_found("Invalid join code"))?;

    match teams::join_team(pool, &team.id, &user.id).await? {
        JoinOutcome::Joined => {}
        JoinOutcome::AlreadyInTeam => return Err(AppError::bad_request("You are already in a team")),
        JoinOutcome::Full => return Err(AppError::bad_request("Team is full")),
    }

    info!(team_id = %team.id, "member joined team");
    notifier::notify(
        pool,
        &team.leader_id,
        "New team member",
        &format!("{} joined {}", user.name, team.name),
    )
    .await;

    Ok(team)
}

#[instrument(skip(pool, user), fields(user_id = %user.id))]
pub async fn leave_team(pool: &SqlitePool, user: &User) -> AppResult<LeaveOutcome> {
    let outcome = teams::leave_team(pool, &user.id)
        .await?
        .ok_or_else(|| AppError::bad_request("You are not in a team"))?;

    if let Some(new_leader) = &outcome.new_leader_id {
        notifier::notify(
            pool,
            new_leader,
            "You are now team leader",
            "The previous leader left the team",
        )
        .await;
    }
    info!(team_id = %outcome.team_id, deleted = outcome.team_deleted, "member left team");
    Ok(outcome)
}

pub async fn team_detail(pool: &SqlitePool, team: Team) -> AppResult<TeamDetail> {
    let members = teams::list_members(pool, &team.id).await?;
    Ok(TeamDetail { team, members })
}

pub async fn regenerate_join_code(pool: &SqlitePool, user: &User, team_id: &str) -> AppResult<Team> {
    let team = teams::get_team(pool, team_id)
        .await?
        .ok_or_else(|| AppError::not_found("Team not found"))?;
    if team.leader_id != user.id {
        return Err(AppError::forbidden("Only the team leader can do that"));
    }

    let code = unused_join_code(pool).await?;
    teams::set_join_code(pool, team_id, &code)
        .await?
        .ok_or_else(|| AppError::not_found("Team not found"))
}

pub async fn delete_team(pool: &SqlitePool, user: &User, team_id: &str) -> AppResult<()> {
    let team = teams::get_team(pool, team_id)
        .await?
        .ok_or_else(|| AppError::not_found("Team not found"))?;
    if team.leader_id != user.id && user.role != Role::Admin {
        return Err(AppError::forbidden("Only the team leader or an admin can delete a team"));
    }

    teams::delete_team(pool, team_id).await?;
    info!(%team_id, "team deleted");
    Ok(())
}

#[instrument(skip(pool))]
pub async fn assign_mentor(pool: &SqlitePool, team_id: &str, mentor_id: &str) -> AppResult<Team> {
    let mentor = users::get_user(pool, mentor_id)
        .await?
        .ok_or_else(|| AppError::not_found("Mentor not found"))?;
    if mentor.role != Role::Mentor {
        return Err(AppError::bad_request("User is not a mentor"));
    }

    let team = teams::set_mentor(pool, team_id, mentor_id)
        .await?
        .ok_or_else(|| AppError::not_found("Team not found"))?;

    notifier::notify(
        pool,
        mentor_id,
        "New team assigned",
        &format!("You are now mentoring {}", team.name),
    )
    .await;
    Ok(team)
}
