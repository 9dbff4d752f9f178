use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use simawa_auth::error::AuthError;
use simawa_auth::session::{AuthUser, require_feature};
use simawa_core::types::NewsPost;

use crate::models::CreateNewsRequest;
use crate::routes::map_db;
use crate::state::AppState;

pub async fn list(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<NewsPost>>, AuthError> {
    require_feature(&auth_user, "news")?;

    let db = state.db.lock().unwrap();
    Ok(Json(db.list_news().map_err(map_db)?))
}

pub async fn create(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateNewsRequest>,
) -> Result<Json<NewsPost>, AuthError> {
    require_feature(&auth_user, "news")?;

    if req.title.is_empty() {
        return Err(AuthError::InvalidInput("title required".into()));
    }

    let db = state.db.lock().unwrap();
    Ok(Json(
        db.insert_news(&req.title, &req.body, req.publish)
            .map_err(map_db)?,
    ))
}

pub async fn remove(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AuthError> {
    require_feature(&auth_user, "news")?;

    let db = state.db.lock().unwrap();
    db.delete_news(&id).map_err(map_db)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
