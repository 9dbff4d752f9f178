use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use simawa_auth::error::AuthError;
use simawa_auth::session::{AuthUser, require_feature};
use simawa_core::types::ServiceRequest;

use crate::models::UpdateServiceStatusRequest;
use crate::routes::map_db;
use crate::state::AppState;

pub async fn list(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ServiceRequest>>, AuthError> {
    require_feature(&auth_user, "layanan")?;

    let db = state.db.lock().unwrap();
    Ok(Json(db.list_service_requests().map_err(map_db)?))
}

pub async fn update_status(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateServiceStatusRequest>,
) -> Result<Json<ServiceRequest>, AuthError> {
    require_feature(&auth_user, "layanan")?;

    let updated = {
        let db = state.db.lock().unwrap();
        db.update_service_status(&id, req.status).map_err(map_db)?
    };
    tracing::info!(
        "service request {} set to {} by {}",
        updated.id,
        updated.status,
        auth_user.username
    );
    Ok(Json(updated))
}
