use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use simawa_auth::error::AuthError;
use simawa_auth::session::{AuthUser, require_feature};
use simawa_core::types::Activity;

use crate::models::CreateActivityRequest;
use crate::routes::map_db;
use crate::state::AppState;

pub async fn list(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Activity>>, AuthError> {
    require_feature(&auth_user, "kegiatan")?;

    let db = state.db.lock().unwrap();
    Ok(Json(db.list_activities().map_err(map_db)?))
}

pub async fn create(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateActivityRequest>,
) -> Result<Json<Activity>, AuthError> {
    require_feature(&auth_user, "kegiatan")?;

    if req.name.is_empty() {
        return Err(AuthError::InvalidInput("name required".into()));
    }
    if req.starts_at > req.ends_at {
        return Err(AuthError::InvalidInput("activity ends before it starts".into()));
    }

    let db = state.db.lock().unwrap();
    Ok(Json(
        db.insert_activity(
            &req.name,
            &req.description,
            &req.location,
            &req.starts_at,
            &req.ends_at,
        )
        .map_err(map_db)?,
    ))
}

pub async fn remove(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AuthError> {
    require_feature(&auth_user, "kegiatan")?;

    let db = state.db.lock().unwrap();
    db.delete_activity(&id).map_err(map_db)?;
    Ok(Json(serde_json::json!({"ok": true})))
}

/// Download the activity agenda as CSV, in start-time order.
pub async fn export_agenda(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AuthError> {
    require_feature(&auth_user, "kegiatan")?;

    let rows = {
        let db = state.db.lock().unwrap();
        db.list_activities().map_err(map_db)?
    };

    let mut out = String::from("name,location,starts_at,ends_at,description\n");
    for a in &rows {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            csv_field(&a.name),
            csv_field(&a.location),
            csv_field(&a.starts_at),
            csv_field(&a.ends_at),
            csv_field(&a.description),
        ));
    }

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"agenda-kegiatan.csv\"",
            ),
        ],
        out,
    )
        .into_response())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_field_quotes_when_needed() {
        assert_eq!(csv_field("Seminar Nasional"), "Seminar Nasional");
        assert_eq!(csv_field("Aula, Gedung A"), "\"Aula, Gedung A\"");
        assert_eq!(csv_field("kata \"penting\""), "\"kata \"\"penting\"\"\"");
    }
}
