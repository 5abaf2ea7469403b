//! User account queries.

use sqlx::SqlitePool;

use crate::auth::models::Role;
use crate::database::models::User;
use crate::database::queries::teams::{self, LeaveOutcome};
use crate::database::{new_id, now};
use crate::errors::DbResult;

pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
}

/// Insert a user. The email must already be normalized.
pub async fn create_user(pool: &SqlitePool, new: NewUser<'_>) -> DbResult<User> {
    let ts = now();
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, password_hash, role, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(new.name)
    .bind(new.email)
    .bind(new.password_hash)
    .bind(new.role)
    .bind(ts)
    .bind(ts)
    .fetch_one(pool)
    .await?;
    Ok(user)
}

pub async fn get_user(pool: &SqlitePool, id: &str) -> DbResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> DbResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// List users, optionally restricted to one role, ordered by name.
pub async fn list_users(pool: &SqlitePool, role: Option<Role>) -> DbResult<Vec<User>> {
    let users = match role {
        Some(role) => {
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE role = ? ORDER BY name, email")
                .bind(role)
                .fetch_all(pool)
                .await?
        }
        None => {
            sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY name, email")
                .fetch_all(pool)
                .await?
        }
    };
    Ok(users)
}

pub async fn list_user_ids(pool: &SqlitePool) -> DbResult<Vec<String>> {
    let ids = sqlx::query_scalar::<_, String>("SELECT id FROM users")
        .fetch_all(pool)
        .await?;
    Ok(ids)
}

/// Update profile fields; `None` leaves a column untouched.
pub async fn update_profile(
    pool: &SqlitePool,
    id: &str,
    name: Option<&str>,
    firebase_uid: Option<&str>,
) -> DbResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET name = COALESCE(?, name),
            firebase_uid = COALESCE(?, firebase_uid),
            updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(firebase_uid)
    .bind(now())
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn update_role(pool: &SqlitePool, id: &str, role: Role) -> DbResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET role = ?, updated_at = ? WHERE id = ? RETURNING *",
    )
    .bind(role)
    .bind(now())
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// What removing an account did to the team it belonged to.
#[derive(Debug)]
pub struct DeletedUser {
    pub team: Option<LeaveOutcome>,
}

/// Delete a user, first taking them out of their team so a leader hands over
/// (or an emptied team goes) in the same transaction. `None` if no such user.
pub async fn delete_user(pool: &SqlitePool, id: &str) -> DbResult<Option<DeletedUser>> {
    let mut tx = pool.begin().await?;
    let team = teams::remove_membership(&mut tx, id).await?;

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    tx.commit().await?;
    Ok(Some(DeletedUser { team }))
}
