//! Handler functions for direct messages between users.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use crate::auth::AuthUser;
use crate::database::models::Message;
use crate::database::queries::{messages, users};
use crate::errors::{AppError, AppResult};
use crate::services::notifier;
use crate::state::AppState;

pub const MAX_MESSAGE_LEN: usize = 2000;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub recipient_id: String,
    pub body: String,
}

fn message_body(body: &str) -> AppResult<&str> {
    let body = body.trim();
    if body.is_empty() {
        return Err(AppError::bad_request("Message cannot be empty"));
    }
    if body.chars().count() > MAX_MESSAGE_LEN {
        return Err(AppError::bad_request(format!(
            "Message must be at most {MAX_MESSAGE_LEN} characters"
        )));
    }
    Ok(body)
}

pub async fn send(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let body = message_body(&req.body)?;
    if req.recipient_id == auth.id() {
        return Err(AppError::bad_request("You cannot message yourself"));
    }

    let pool = state.db.pool();
    let recipient = users::get_user(pool, &req.recipient_id)
        .await?
        .ok_or_else(|| AppError::not_found("Recipient not found"))?;

    let message = messages::create_message(pool, auth.id(), &recipient.id, body).await?;
    debug!(message_id = %message.id, "message sent");

    notifier::notify(
        pool,
        &recipient.id,
        "New message",
        &format!("{} sent you a message", auth.user().name),
    )
    .await;

    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn inbox(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Vec<Message>>> {
    Ok(Json(messages::inbox(state.db.pool(), auth.id()).await?))
}

pub async fn sent(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Vec<Message>>> {
    Ok(Json(messages::sent(state.db.pool(), auth.id()).await?))
}

pub async fn conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Message>>> {
    let thread = messages::conversation(state.db.pool(), auth.id(), &user_id).await?;
    Ok(Json(thread))
}

pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !messages::mark_read(state.db.pool(), &id, auth.id()).await? {
        return Err(AppError::not_found("Message not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
