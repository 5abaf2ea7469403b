//! Announcement queries, with read state tracked per user.

use sqlx::SqlitePool;

use crate::database::models::{Announcement, AnnouncementView};
use crate::database::{new_id, now};
use crate::errors::DbResult;

pub async fn create_announcement(
    pool: &SqlitePool,
    author_id: &str,
    title: &str,
    body: &str,
) -> DbResult<Announcement> {
    let announcement = sqlx::query_as::<_, Announcement>(
        r#"
        INSERT INTO announcements (id, author_id, title, body, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(author_id)
    .bind(title)
    .bind(body)
    .bind(now())
    .fetch_one(pool)
    .await?;
    Ok(announcement)
}

pub async fn get_announcement(pool: &SqlitePool, id: &str) -> DbResult<Option<Announcement>> {
    let announcement = sqlx::query_as::<_, Announcement>("SELECT * FROM announcements WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(announcement)
}

/// All announcements, newest first, with the viewer's read flag.
pub async fn list_for_user(pool: &SqlitePool, user_id: &str) -> DbResult<Vec<AnnouncementView>> {
    let announcements = sqlx::query_as::<_, AnnouncementView>(
        r#"
        SELECT a.id, a.author_id, a.title, a.body,
               EXISTS(
                   SELECT 1 FROM announcement_reads r
                   WHERE r.announcement_id = a.id AND r.user_id = ?
               ) AS is_read,
               a.created_at
        FROM announcements a
        ORDER BY a.created_at DESC, a.rowid DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(announcements)
}

/// Idempotent; marking twice keeps the first read time.
pub async fn mark_read(pool: &SqlitePool, announcement_id: &str, user_id: &str) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO announcement_reads (announcement_id, user_id, read_at)
        VALUES (?, ?, ?)
        ON CONFLICT (announcement_id, user_id) DO NOTHING
        "#,
    )
    .bind(announcement_id)
    .bind(user_id)
    .bind(now())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_announcement(pool: &SqlitePool, id: &str) -> DbResult<bool> {
    let result = sqlx::query("DELETE FROM announcements WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;
    use crate::database::queries::test_support;

    #[tokio::test]
    async fn test_read_state_is_per_user() {
        let db = test_support::db().await;
        let coord = test_support::user(&db, "Coord", Role::Coordinator).await;
        let ada = test_support::user(&db, "Ada", Role::Student).await;

        let post = create_announcement(db.pool(), &coord.id, "Kickoff", "9am").await.unwrap();
        mark_read(db.pool(), &post.id, &ada.id).await.unwrap();
        mark_read(db.pool(), &post.id, &ada.id).await.unwrap();

        assert!(list_for_user(db.pool(), &ada.id).await.unwrap()[0].is_read);
        assert!(!list_for_user(db.pool(), &coord.id).await.unwrap()[0].is_read);

        assert!(delete_announcement(db.pool(), &post.id).await.unwrap());
        assert!(get_announcement(db.pool(), &post.id).await.unwrap().is_none());
    }
}
