use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use simawa_auth::error::AuthError;
use simawa_auth::password::hash_password;
use simawa_auth::session::AuthUser;
use simawa_auth::types::{CreateUserRequest, SetActiveRequest, UpdatePasswordRequest, User};

use crate::models::UserResponse;
use crate::state::AppState;

fn user_to_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        name: user.name,
        role: user.role.as_str().to_string(),
        role_label: user.role.label().to_string(),
        is_active: user.is_active,
        created_at: user.created_at,
    }
}

pub async fn list(
    _auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, AuthError> {
    let users = state.users.list_users().await?;
    Ok(Json(users.into_iter().map(user_to_response).collect()))
}

pub async fn create(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, AuthError> {
    if req.username.is_empty() || req.password.len() < 4 {
        return Err(AuthError::InvalidInput(
            "username required, password min 4 chars".into(),
        ));
    }

    let password_hash = hash_password(&req.password)?;
    let user = state
        .users
        .create_user(&req.username, &req.name, req.role, &password_hash)
        .await?;

    tracing::info!(
        "user {} ({}) created by {}",
        user.username,
        user.role,
        auth_user.username
    );
    Ok(Json(user_to_response(user)))
}

pub async fn set_active(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SetActiveRequest>,
) -> Result<Json<UserResponse>, AuthError> {
    if auth_user.user_id == id && !req.is_active {
        return Err(AuthError::Forbidden("cannot deactivate yourself".into()));
    }

    let user = state.users.set_active(&id, req.is_active).await?;
    Ok(Json(user_to_response(user)))
}

pub async fn update_password(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePasswordRequest>,
) -> Result<Json<serde_json::Value>, AuthError> {
    if req.password.len() < 4 {
        return Err(AuthError::InvalidInput("password min 4 chars".into()));
    }

    let password_hash = hash_password(&req.password)?;
    state.users.update_password(&id, &password_hash).await?;

    tracing::info!("password changed for {id} by {}", auth_user.username);
    Ok(Json(serde_json::json!({"ok": true})))
}

pub async fn remove(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AuthError> {
    if auth_user.user_id == id {
        return Err(AuthError::Forbidden("cannot delete yourself".into()));
    }

    state.users.delete_user(&id).await?;
    Ok(Json(serde_json::json!({"ok": true})))
}
