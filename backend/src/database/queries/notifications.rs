//! Notification queries.

use sqlx::SqlitePool;

use crate::database::models::Notification;
use crate::database::{new_id, now};
use crate::errors::DbResult;

pub async fn create_notification(
    pool: &SqlitePool,
    user_id: &str,
    title: &str,
    body: &str,
) -> DbResult<Notification> {
    let notification = sqlx::query_as::<_, Notification>(
        r#"
        INSERT INTO notifications (id, user_id, title, body, is_read, created_at)
        VALUES (?, ?, ?, ?, 0, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(user_id)
    .bind(title)
    .bind(body)
    .bind(now())
    .fetch_one(pool)
    .await?;
    Ok(notification)
}

/// Send the same notification to many users in one transaction.
pub async fn create_many(
    pool: &SqlitePool,
    user_ids: &[String],
    title: &str,
    body: &str,
) -> DbResult<u64> {
    let ts = now();
    let mut tx = pool.begin().await?;
    let mut created = 0;

    for user_id in user_ids {
        created += sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, title, body, is_read, created_at)
            VALUES (?, ?, ?, ?, 0, ?)
            "#,
        )
        .bind(new_id())
        .bind(user_id)
        .bind(title)
        .bind(body)
        .bind(ts)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    tx.commit().await?;
    Ok(created)
}

/// A user's notifications, newest first.
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: &str,
    unread_only: bool,
) -> DbResult<Vec<Notification>> {
    let sql = if unread_only {
        "SELECT * FROM notifications WHERE user_id = ? AND is_read = 0 ORDER BY created_at DESC, rowid DESC"
    } else {
        "SELECT * FROM notifications WHERE user_id = ? ORDER BY created_at DESC, rowid DESC"
    };
    let notifications = sqlx::query_as::<_, Notification>(sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(notifications)
}

pub async fn unread_count(pool: &SqlitePool, user_id: &str) -> DbResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM notifications WHERE user_id = ? AND is_read = 0",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Mark one of the user's notifications read. Other users' rows are untouched.
pub async fn mark_read(pool: &SqlitePool, id: &str, user_id: &str) -> DbResult<bool> {
    let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn mark_all_read(pool: &SqlitePool, user_id: &str) -> DbResult<u64> {
    let result =
        sqlx::query("UPDATE notifications SET is_read = 1 WHERE user_id = ? AND is_read = 0")
            .bind(user_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected())
}

pub async fn delete_notification(pool: &SqlitePool, id: &str, user_id: &str) -> DbResult<bool> {
    let result = sqlx::query("DELETE FROM notifications WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
