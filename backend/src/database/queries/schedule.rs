//! Event schedule queries.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::database::models::ScheduleEvent;
use crate::database::{new_id, now};
use crate::errors::DbResult;

pub struct EventFields<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub location: Option<&'a str>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

pub async fn create_event(
    pool: &SqlitePool,
    fields: EventFields<'_>,
    created_by: &str,
) -> DbResult<ScheduleEvent> {
    let event = sqlx::query_as::<_, ScheduleEvent>(
        r#"
        INSERT INTO schedule_events (id, title, description, location, starts_at, ends_at, created_by, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(new_id())
    .bind(fields.title)
    .bind(fields.description)
    .bind(fields.location)
    .bind(fields.starts_at)
    .bind(fields.ends_at)
    .bind(created_by)
    .bind(now())
    .fetch_one(pool)
    .await?;
    Ok(event)
}

pub async fn update_event(
    pool: &SqlitePool,
    id: &str,
    fields: EventFields<'_>,
) -> DbResult<Option<ScheduleEvent>> {
    let event = sqlx::query_as::<_, ScheduleEvent>(
        r#"
        UPDATE schedule_events
        SET title = ?, description = ?, location = ?, starts_at = ?, ends_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(fields.title)
    .bind(fields.description)
    .bind(fields.location)
    .bind(fields.starts_at)
    .bind(fields.ends_at)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(event)
}

/// Events in start order.
pub async fn list_events(pool: &SqlitePool) -> DbResult<Vec<ScheduleEvent>> {
    let events = sqlx::query_as::<_, ScheduleEvent>(
        "SELECT * FROM schedule_events ORDER BY starts_at, rowid",
    )
    .fetch_all(pool)
    .await?;
    Ok(events)
}

pub async fn delete_event(pool: &SqlitePool, id: &str) -> DbResult<bool> {
    let result = sqlx::query("DELETE FROM schedule_events WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
