//! Team and membership queries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::models::{Team, TeamMember, TeamSummary};
use crate::database::{new_id, now};
use crate::errors::DbResult;

const SUMMARY_SELECT: &str = r#"
    SELECT t.id, t.name, t.description, t.capacity, t.leader_id, t.mentor_id,
           (SELECT COUNT(*) FROM team_members m WHERE m.team_id = t.id) AS member_count,
           t.created_at
    FROM teams t
"#;

pub struct NewTeam<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub capacity: i64,
    pub join_code: &'a str,
    pub leader_id: &'a str,
}

/// Result of trying to add a member through a join code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    AlreadyInTeam,
    Full,
}

/// What happened to a team when a member left it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaveOutcome {
    pub team_id: String,
    pub new_leader_id: Option<String>,
    pub team_deleted: bool,
}

/// Insert a team and its leader's membership in one transaction.
pub async fn create_team(pool: &SqlitePool, new: NewTeam<'_>) -> DbResult<Team> {
    let ts = now();
    let mut tx = pool.begin().await?;

    let team = sqlx::query_as::<_, Team>(
        r#"
        INSERT INTO teams (id, name, description, join_code, capacity, leader_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(new.name)
    .bind(new.description)
    .bind(new.join_code)
    .bind(new.capacity)
    .bind(new.leader_id)
    .bind(ts)
    .bind(ts)
    .fetch_one(&mut *tx)
    .await?;

    insert_member(&mut tx, &team.id, new.leader_id, ts).await?;

    tx.commit().await?;
    Ok(team)
}

async fn insert_member(
    conn: &mut sqlx::SqliteConnection,
    team_id: &str,
    user_id: &str,
    joined_at: DateTime<Utc>,
) -> DbResult<()> {
    sqlx::query("INSERT INTO team_members (team_id, user_id, joined_at) VALUES (?, ?, ?)")
        .bind(team_id)
        .bind(user_id)
        .bind(joined_at)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn get_team(pool: &SqlitePool, id: &str) -> DbResult<Option<Team>> {
    let team = sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(team)
}

/// Case-insensitive name check (the column collates NOCASE).
pub async fn team_name_exists(pool: &SqlitePool, name: &str) -> DbResult<bool> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM teams WHERE name = ?)")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

pub async fn join_code_exists(pool: &SqlitePool, code: &str) -> DbResult<bool> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM teams WHERE join_code = ?)")
            .bind(code)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

pub async fn get_team_by_join_code(pool: &SqlitePool, code: &str) -> DbResult<Option<Team>> {
    let team = sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE join_code = ?")
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(team)
}

pub async fn list_teams(pool: &SqlitePool) -> DbResult<Vec<TeamSummary>> {
    let sql = format!("{SUMMARY_SELECT} ORDER BY t.name");
    let teams = sqlx::query_as::<_, TeamSummary>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(teams)
}

pub async fn list_teams_for_mentor(pool: &SqlitePool, mentor_id: &str) -> DbResult<Vec<TeamSummary>> {
    let sql = format!("{SUMMARY_SELECT} WHERE t.mentor_id = ? ORDER BY t.name");
    let teams = sqlx::query_as::<_, TeamSummary>(&sql)
        .bind(mentor_id)
        .fetch_all(pool)
        .await?;
    Ok(teams)
}

/// Members in join order.
pub async fn list_members(pool: &SqlitePool, team_id: &str) -> DbResult<Vec<TeamMember>> {
    let members = sqlx::query_as::<_, TeamMember>(
        r#"
        SELECT u.id AS user_id, u.name, u.email, m.joined_at
        FROM team_members m
        JOIN users u ON u.id = m.user_id
        WHERE m.team_id = ?
        ORDER BY m.joined_at, m.rowid
        "#,
    )
    .bind(team_id)
    .fetch_all(pool)
    .await?;
    Ok(members)
}

pub async fn member_ids(pool: &SqlitePool, team_id: &str) -> DbResult<Vec<String>> {
    let ids = sqlx::query_scalar::<_, String>(
        "SELECT user_id FROM team_members WHERE team_id = ? ORDER BY joined_at, rowid",
    )
    .bind(team_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

pub async fn is_member(pool: &SqlitePool, team_id: &str, user_id: &str) -> DbResult<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM team_members WHERE team_id = ? AND user_id = ?)",
    )
    .bind(team_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// The team a user belongs to, if any.
pub async fn team_for_user(pool: &SqlitePool, user_id: &str) -> DbResult<Option<Team>> {
    let team = sqlx::query_as::<_, Team>(
        r#"
        SELECT t.* FROM teams t
        JOIN team_members m ON m.team_id = t.id
        WHERE m.user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(team)
}

/// Add `user_id` to a team if it has room and the user is teamless.
///
/// The capacity check is part of the insert statement itself, so two
/// concurrent joins cannot both take the last seat.
pub async fn join_team(pool: &SqlitePool, team_id: &str, user_id: &str) -> DbResult<JoinOutcome> {
    let mut tx = pool.begin().await?;

    let already = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM team_members WHERE user_id = ?)",
    )
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;
    if already {
        return Ok(JoinOutcome::AlreadyInTeam);
    }

    let inserted = sqlx::query(
        r#"
        INSERT INTO team_members (team_id, user_id, joined_at)
        SELECT t.id, ?, ? FROM teams t
        WHERE t.id = ?
          AND (SELECT COUNT(*) FROM team_members m WHERE m.team_id = t.id) < t.capacity
        "#,
    )
    .bind(user_id)
    .bind(now())
    .bind(team_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if inserted == 0 {
        return Ok(JoinOutcome::Full);
    }

    sqlx::query("UPDATE teams SET updated_at = ? WHERE id = ?")
        .bind(now())
        .bind(team_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(JoinOutcome::Joined)
}

/// Remove `user_id` from their team.
///
/// A departing leader hands over to the earliest-joined remaining member; a
/// team left with nobody is deleted. Returns `None` if the user had no team.
pub async fn leave_team(pool: &SqlitePool, user_id: &str) -> DbResult<Option<LeaveOutcome>> {
    let mut tx = pool.begin().await?;
    let outcome = remove_membership(&mut tx, user_id).await?;
    tx.commit().await?;
    Ok(outcome)
}

/// Drop `user_id` from their team inside the caller's transaction, handing
/// leadership to the earliest remaining member or deleting an emptied team.
pub(crate) async fn remove_membership(
    conn: &mut sqlx::SqliteConnection,
    user_id: &str,
) -> DbResult<Option<LeaveOutcome>> {
    let team = sqlx::query_as::<_, Team>(
        r#"
        SELECT t.* FROM teams t
        JOIN team_members m ON m.team_id = t.id
        WHERE m.user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(team) = team else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM team_members WHERE team_id = ? AND user_id = ?")
        .bind(&team.id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    let next = sqlx::query_scalar::<_, String>(
        "SELECT user_id FROM team_members WHERE team_id = ? ORDER BY joined_at, rowid LIMIT 1",
    )
    .bind(&team.id)
    .fetch_optional(&mut *conn)
    .await?;

    let outcome = match next {
        None => {
            sqlx::query("DELETE FROM teams WHERE id = ?")
                .bind(&team.id)
                .execute(&mut *conn)
                .await?;
            LeaveOutcome {
                team_id: team.id,
                new_leader_id: None,
                team_deleted: true,
            }
        }
        Some(next_id) if team.leader_id == user_id => {
            sqlx::query("UPDATE teams SET leader_id = ?, updated_at = ? WHERE id = ?")
                .bind(&next_id)
                .bind(now())
                .bind(&team.id)
                .execute(&mut *conn)
                .await?;
            LeaveOutcome {
                team_id: team.id,
                new_leader_id: Some(next_id),
                team_deleted: false,
            }
        }
        Some(_) => LeaveOutcome {
            team_id: team.id,
            new_leader_id: None,
            team_deleted: false,
        },
    };

    Ok(Some(outcome))
}

pub async fn set_join_code(pool: &SqlitePool, team_id: &str, code: &str) -> DbResult<Option<Team>> {
    let team = sqlx::query_as::<_, Team>(
        "UPDATE teams SET join_code = ?, updated_at = ? WHERE id = ? RETURNING *",
    )
    .bind(code)
    .bind(now())
    .bind(team_id)
    .fetch_optional(pool)
    .await?;
    Ok(team)
}

pub async fn set_mentor(pool: &SqlitePool, team_id: &str, mentor_id: &str) -> DbResult<Option<Team>> {
    let team = sqlx::query_as::<_, Team>(
        "UPDATE teams SET mentor_id = ?, updated_at = ? WHERE id = ? RETURNING *",
    )
    .bind(mentor_id)
    .bind(now())
    .bind(team_id)
    .fetch_optional(pool)
    .await?;
    Ok(team)
}

pub async fn delete_team(pool: &SqlitePool, id: &str) -> DbResult<bool> {
    let result = sqlx::query("DELETE FROM teams WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
