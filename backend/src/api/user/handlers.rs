//! Handler functions for user profile and management API endpoints.
//!
//! These functions process requests for user data, interact with the database
//! and return user-specific information. Listing and role management are
//! restricted to organizers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::auth::{AuthUser, Role};
use crate::database::models::User;
use crate::database::queries::users;
use crate::errors::{AppError, AppResult};
use crate::services::notifier;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub firebase_uid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<Vec<User>>> {
    auth.require_organizer()?;
    let users = users::list_users(state.db.pool(), query.role).await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let user = users::get_user(state.db.pool(), &id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(user))
}

pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<Json<User>> {
    let name = req.name.as_deref().map(str::trim);
    if name.is_some_and(str::is_empty) {
        return Err(AppError::bad_request("Name cannot be empty"));
    }
    let firebase_uid = req.firebase_uid.as_deref().map(str::trim).filter(|u| !u.is_empty());

    let user = users::update_profile(state.db.pool(), auth.id(), name, firebase_uid)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(user))
}

pub async fn update_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateRoleRequest>,
) -> AppResult<Json<User>> {
    auth.require(&[Role::Admin])?;
    let user = users::update_role(state.db.pool(), &id, req.role)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    info!(user_id = %user.id, role = %user.role, changed_by = %auth.id(), "role changed");
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    auth.require(&[Role::Admin])?;
    if id == auth.id() {
        return Err(AppError::bad_request("You cannot delete your own account"));
    }

    let deleted = users::delete_user(state.db.pool(), &id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if let Some(new_leader) = deleted.team.as_ref().and_then(|t| t.new_leader_id.as_deref()) {
        notifier::notify(
            state.db.pool(),
            new_leader,
            "You are now team leader",
            "The previous leader's account was removed",
        )
        .await;
    }
    info!(user_id = %id, deleted_by = %auth.id(), "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
