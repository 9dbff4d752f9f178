use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use simawa_auth::error::AuthError;
use simawa_auth::session::{AuthUser, require_feature};
use simawa_core::types::Achievement;

use crate::models::CreateAchievementRequest;
use crate::routes::map_db;
use crate::state::AppState;

pub async fn list(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Achievement>>, AuthError> {
    require_feature(&auth_user, "achievements")?;

    let db = state.db.lock().unwrap();
    Ok(Json(db.list_achievements().map_err(map_db)?))
}

pub async fn create(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAchievementRequest>,
) -> Result<Json<Achievement>, AuthError> {
    require_feature(&auth_user, "achievements")?;

    if req.student_name.is_empty() || req.title.is_empty() {
        return Err(AuthError::InvalidInput("student_name and title required".into()));
    }

    let db = state.db.lock().unwrap();
    Ok(Json(
        db.insert_achievement(&req.student_name, &req.nim, &req.title, req.level, req.year)
            .map_err(map_db)?,
    ))
}

pub async fn remove(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AuthError> {
    require_feature(&auth_user, "achievements")?;

    let db = state.db.lock().unwrap();
    db.delete_achievement(&id).map_err(map_db)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
