use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use simawa_auth::error::AuthError;
use simawa_auth::session::{AuthUser, require_feature};
use simawa_core::types::Scholarship;

use crate::models::CreateScholarshipRequest;
use crate::routes::map_db;
use crate::state::AppState;

pub async fn list(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Scholarship>>, AuthError> {
    require_feature(&auth_user, "beasiswa")?;

    let db = state.db.lock().unwrap();
    Ok(Json(db.list_scholarships().map_err(map_db)?))
}

pub async fn create(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateScholarshipRequest>,
) -> Result<Json<Scholarship>, AuthError> {
    require_feature(&auth_user, "beasiswa")?;

    if req.name.is_empty() {
        return Err(AuthError::InvalidInput("name required".into()));
    }
    if req.opens_at > req.closes_at {
        return Err(AuthError::InvalidInput(
            "application window closes before it opens".into(),
        ));
    }

    let db = state.db.lock().unwrap();
    Ok(Json(
        db.insert_scholarship(
            &req.name,
            &req.provider,
            &req.description,
            req.quota,
            &req.opens_at,
            &req.closes_at,
        )
        .map_err(map_db)?,
    ))
}

pub async fn remove(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AuthError> {
    require_feature(&auth_user, "beasiswa")?;

    let db = state.db.lock().unwrap();
    db.delete_scholarship(&id).map_err(map_db)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
