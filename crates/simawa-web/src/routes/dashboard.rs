use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use simawa_auth::menu::build_menu;
use simawa_auth::session::AuthUser;

use crate::models::{AdminDashboardResponse, AdminStats, StudentDashboardResponse};
use crate::routes::claims_identity;
use crate::state::AppState;

fn collect_stats(state: &AppState) -> AdminStats {
    let db = state.db.lock().unwrap();
    AdminStats {
        announcements: db.count_announcements().unwrap_or_default(),
        activities: db.count_activities().unwrap_or_default(),
        scholarships: db.count_scholarships().unwrap_or_default(),
        pending_services: db.count_pending_services().unwrap_or_default(),
        achievements: db.count_achievements().unwrap_or_default(),
    }
}

pub async fn superadmin(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Json<AdminDashboardResponse> {
    let total_users = state.users.user_count().await.unwrap_or_default();
    let stats = collect_stats(&state);

    Json(AdminDashboardResponse {
        identity: claims_identity(&auth_user),
        menu: build_menu(&auth_user.role),
        stats,
        total_users: Some(total_users),
    })
}

pub async fn admin(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Json<AdminDashboardResponse> {
    let stats = collect_stats(&state);

    Json(AdminDashboardResponse {
        identity: claims_identity(&auth_user),
        menu: build_menu(&auth_user.role),
        stats,
        total_users: None,
    })
}

pub async fn mahasiswa(
    auth_user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Json<StudentDashboardResponse> {
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let (announcements, open_scholarships) = {
        let db = state.db.lock().unwrap();
        (
            db.list_published_announcements().unwrap_or_default(),
            db.list_open_scholarships(&today).unwrap_or_default(),
        )
    };

    Json(StudentDashboardResponse {
        identity: claims_identity(&auth_user),
        menu: build_menu(&auth_user.role),
        announcements,
        open_scholarships,
    })
}
