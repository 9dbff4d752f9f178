//! Student-facing surface: published/open content only, no feature gate
//! beyond authentication.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use simawa_auth::error::AuthError;
use simawa_auth::session::AuthUser;
use simawa_core::types::{
    Achievement, Activity, Announcement, NewsPost, Scholarship, ServiceRequest,
};

use crate::models::CreateServiceRequest;
use crate::routes::map_db;
use crate::state::AppState;

pub async fn list_announcements(
    _auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Announcement>>, AuthError> {
    let db = state.db.lock().unwrap();
    Ok(Json(db.list_published_announcements().map_err(map_db)?))
}

pub async fn list_open_scholarships(
    _auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Scholarship>>, AuthError> {
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let db = state.db.lock().unwrap();
    Ok(Json(db.list_open_scholarships(&today).map_err(map_db)?))
}

pub async fn list_upcoming_activities(
    _auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Activity>>, AuthError> {
    let now = chrono::Utc::now().format("%Y-%m-%d %H:%M").to_string();
    let db = state.db.lock().unwrap();
    Ok(Json(db.list_upcoming_activities(&now).map_err(map_db)?))
}

pub async fn list_news(
    _auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<NewsPost>>, AuthError> {
    let db = state.db.lock().unwrap();
    Ok(Json(db.list_published_news().map_err(map_db)?))
}

pub async fn list_achievements(
    _auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Achievement>>, AuthError> {
    let db = state.db.lock().unwrap();
    Ok(Json(db.list_achievements().map_err(map_db)?))
}

pub async fn list_my_services(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ServiceRequest>>, AuthError> {
    let db = state.db.lock().unwrap();
    Ok(Json(
        db.list_service_requests_for_user(&auth_user.user_id)
            .map_err(map_db)?,
    ))
}

pub async fn create_service(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateServiceRequest>,
) -> Result<Json<ServiceRequest>, AuthError> {
    if req.subject.is_empty() {
        return Err(AuthError::InvalidInput("subject required".into()));
    }

    let created = {
        let db = state.db.lock().unwrap();
        db.insert_service_request(&auth_user.user_id, &req.subject, &req.detail)
            .map_err(map_db)?
    };
    tracing::info!("service request opened by {}: {}", auth_user.username, created.subject);
    Ok(Json(created))
}
