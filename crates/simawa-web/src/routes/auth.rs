use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use simawa_auth::error::AuthError;
use simawa_auth::jwt::create_session;
use simawa_auth::menu::build_menu;
use simawa_auth::password::verify_password;
use simawa_auth::role::dashboard_path;
use simawa_auth::session::{AuthUser, SESSION_COOKIE};

use crate::models::{LoginResponse, MeResponse};
use crate::routes::claims_identity;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AuthError> {
    // Unknown user and wrong password must be indistinguishable
    let user = match state.users.get_user_by_username(&req.username).await {
        Ok(u) => u,
        Err(AuthError::NotFound(_)) => return Err(AuthError::Unauthorized),
        Err(e) => return Err(e),
    };
    if !user.is_active {
        return Err(AuthError::Unauthorized);
    }

    let hash = state.users.get_password_hash(&user.id).await?;
    if !verify_password(&req.password, &hash)? {
        return Err(AuthError::Unauthorized);
    }

    let ttl = state.config.web.session_ttl_secs;
    let token = create_session(
        &user.id,
        &user.username,
        &user.name,
        user.role.as_str(),
        state.jwt_secret(),
        ttl,
    )?;

    tracing::info!("login: {} ({})", user.username, user.role);

    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl}");
    let body = Json(LoginResponse {
        token,
        role: user.role.as_str().to_string(),
        dashboard: dashboard_path(user.role.as_str()).to_string(),
        expires_in: ttl,
    });

    Ok(([(header::SET_COOKIE, cookie)], body).into_response())
}

pub async fn logout() -> Response {
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    (
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({"ok": true})),
    )
        .into_response()
}

pub async fn me(auth_user: AuthUser) -> Json<MeResponse> {
    let menu = build_menu(&auth_user.role);
    Json(MeResponse {
        identity: claims_identity(&auth_user),
        menu,
    })
}
