use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use simawa_auth::error::AuthError;
use simawa_auth::session::{AuthUser, require_feature};
use simawa_core::types::Organization;

use crate::models::CreateOrganizationRequest;
use crate::routes::map_db;
use crate::state::AppState;

pub async fn list(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Organization>>, AuthError> {
    require_feature(&auth_user, "organisasi")?;

    let db = state.db.lock().unwrap();
    Ok(Json(db.list_organizations().map_err(map_db)?))
}

pub async fn create(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrganizationRequest>,
) -> Result<Json<Organization>, AuthError> {
    require_feature(&auth_user, "organisasi")?;

    if req.name.is_empty() || req.abbrev.is_empty() {
        return Err(AuthError::InvalidInput("name and abbrev required".into()));
    }

    let db = state.db.lock().unwrap();
    Ok(Json(
        db.insert_organization(
            &req.name,
            &req.abbrev,
            &req.description,
            &req.chairperson,
            &req.period,
        )
        .map_err(map_db)?,
    ))
}

pub async fn remove(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AuthError> {
    require_feature(&auth_user, "organisasi")?;

    let db = state.db.lock().unwrap();
    db.delete_organization(&id).map_err(map_db)?;
    Ok(Json(serde_json::json!({"ok": true})))
}
