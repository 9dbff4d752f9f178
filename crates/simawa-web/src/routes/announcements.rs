use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use simawa_auth::error::AuthError;
use simawa_auth::session::{AuthUser, require_feature};
use simawa_core::types::Announcement;

use crate::models::{CreateAnnouncementRequest, UpdateAnnouncementRequest};
use crate::routes::map_db;
use crate::state::AppState;

pub async fn list(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Announcement>>, AuthError> {
    require_feature(&auth_user, "pengumuman")?;

    let db = state.db.lock().unwrap();
    Ok(Json(db.list_announcements().map_err(map_db)?))
}

pub async fn get_one(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Announcement>, AuthError> {
    require_feature(&auth_user, "pengumuman")?;

    let db = state.db.lock().unwrap();
    Ok(Json(db.get_announcement(&id).map_err(map_db)?))
}

pub async fn create(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAnnouncementRequest>,
) -> Result<Json<Announcement>, AuthError> {
    require_feature(&auth_user, "pengumuman")?;

    if req.title.is_empty() {
        return Err(AuthError::InvalidInput("title required".into()));
    }

    let created = {
        let db = state.db.lock().unwrap();
        db.insert_announcement(&req.title, &req.body, req.status)
            .map_err(map_db)?
    };
    tracing::info!("announcement created by {}: {}", auth_user.username, created.title);
    Ok(Json(created))
}

pub async fn update(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAnnouncementRequest>,
) -> Result<Json<Announcement>, AuthError> {
    require_feature(&auth_user, "pengumuman")?;

    if req.title.is_empty() {
        return Err(AuthError::InvalidInput("title required".into()));
    }

    let db = state.db.lock().unwrap();
    Ok(Json(
        db.update_announcement(&id, &req.title, &req.body, req.status)
            .map_err(map_db)?,
    ))
}

pub async fn remove(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AuthError> {
    require_feature(&auth_user, "pengumuman")?;

    let db = state.db.lock().unwrap();
    db.delete_announcement(&id).map_err(map_db)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
