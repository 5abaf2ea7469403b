//! Direct message queries.

use sqlx::SqlitePool;

use crate::database::models::Message;
use crate::database::{new_id, now};
use crate::errors::DbResult;

pub async fn create_message(
    pool: &SqlitePool,
    sender_id: &str,
    recipient_id: &str,
    body: &str,
) -> DbResult<Message> {
    let message = sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (id, sender_id, recipient_id, body, is_read, created_at)
        VALUES (?, ?, ?, ?, 0, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(sender_id)
    .bind(recipient_id)
    .bind(body)
    .bind(now())
    .fetch_one(pool)
    .await?;
    Ok(message)
}

/// Messages received by a user, newest first.
pub async fn inbox(pool: &SqlitePool, user_id: &str) -> DbResult<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(
        "SELECT * FROM messages WHERE recipient_id = ? ORDER BY created_at DESC, rowid DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(messages)
}

/// Messages sent by a user, newest first.
pub async fn sent(pool: &SqlitePool, user_id: &str) -> DbResult<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(
        "SELECT * FROM messages WHERE sender_id = ? ORDER BY created_at DESC, rowid DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(messages)
}

/// Both directions between two users, oldest first.
pub async fn conversation(pool: &SqlitePool, user_id: &str, other_id: &str) -> DbResult<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(
        r#"
        SELECT * FROM messages
        WHERE (sender_id = ? AND recipient_id = ?)
           OR (sender_id = ? AND recipient_id = ?)
        ORDER BY created_at, rowid
        "#,
    )
    .bind(user_id)
    .bind(other_id)
    .bind(other_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(messages)
}

/// Only the recipient can mark a message read.
pub async fn mark_read(pool: &SqlitePool, id: &str, recipient_id: &str) -> DbResult<bool> {
    let result = sqlx::query("UPDATE messages SET is_read = 1 WHERE id = ? AND recipient_id = ?")
        .bind(id)
        .bind(recipient_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
