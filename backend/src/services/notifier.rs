//! Fan-out of in-app notifications.
//!
//! Notifications are side effects of other actions. A failure to record one is
//! logged and swallowed so it never fails the request that triggered it.

use sqlx::SqlitePool;
use tracing::warn;

use crate::database::queries::{notifications, users};

pub async fn notify(pool: &SqlitePool, user_id: &str, title: &str, body: &str) {
    if let Err(err) = notifications::create_notification(pool, user_id, title, body).await {
        warn!(%user_id, error = %err, "failed to record notification");
    }
}

pub async fn notify_many(pool: &SqlitePool, user_ids: &[String], title: &str, body: &str) {
    if user_ids.is_empty() {
        return;
    }
    if let Err(err) = notifications::create_many(pool, user_ids, title, body).await {
        warn!(recipients = user_ids.len(), error = %err, "failed to record notifications");
    }
}

/// Notify every account, optionally skipping one (usually the author).
pub async fn notify_everyone(pool: &SqlitePool, except: Option<&str>, title: &str, body: &str) {
    match users::list_user_ids(pool).await {
        Ok(mut ids) => {
            if let Some(skip) = except {
                ids.retain(|id| id != skip);
            }
            notify_many(pool, &ids, title, body).await;
        }
        Err(err) => warn!(error = %err, "failed to load recipients for broadcast"),
    }
}
