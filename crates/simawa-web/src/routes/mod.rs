pub mod achievements;
pub mod activities;
pub mod announcements;
pub mod auth;
pub mod dashboard;
pub mod news;
pub mod organizations;
pub mod portal;
pub mod scholarships;
pub mod services;
pub mod users;

use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::{Extension, Router, middleware};
use tower_http::trace::TraceLayer;

use simawa_auth::AuthError;
use simawa_auth::role::Role;
use simawa_auth::session::AuthState;
use simawa_core::PortalError;

use crate::guard::{RoleGate, guest_gate, role_gate};
use crate::models::IdentityResponse;
use crate::state::AppState;
use crate::static_files;

/// Every back-office role; route groups narrow this down where needed.
pub const ADMIN_ROLES: &str = "superadmin,kemahasiswaan,adminbem,adminmpm";

pub fn build_router(state: Arc<AppState>) -> Router {
    let auth_state = AuthState {
        jwt_secret: state.config.web.jwt_secret.clone(),
    };

    // Public auth API
    let auth_routes = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .with_state(state.clone());

    // Student-facing reads + own service requests (any authenticated user)
    let portal_api = Router::new()
        .route("/api/portal/announcements", get(portal::list_announcements))
        .route("/api/portal/scholarships", get(portal::list_open_scholarships))
        .route("/api/portal/activities", get(portal::list_upcoming_activities))
        .route("/api/portal/news", get(portal::list_news))
        .route("/api/portal/achievements", get(portal::list_achievements))
        .route(
            "/api/portal/services",
            get(portal::list_my_services).post(portal::create_service),
        )
        .with_state(state.clone());

    // Back-office JSON API, feature-checked per handler
    let admin_api = Router::new()
        .route(
            "/api/admin/announcements",
            get(announcements::list).post(announcements::create),
        )
        .route(
            "/api/admin/announcements/{id}",
            get(announcements::get_one)
                .put(announcements::update)
                .delete(announcements::remove),
        )
        .route("/api/admin/services", get(services::list))
        .route("/api/admin/services/{id}/status", put(services::update_status))
        .route(
            "/api/admin/scholarships",
            get(scholarships::list).post(scholarships::create),
        )
        .route("/api/admin/scholarships/{id}", delete(scholarships::remove))
        .route(
            "/api/admin/activities",
            get(activities::list).post(activities::create),
        )
        .route("/api/admin/activities/agenda", get(activities::export_agenda))
        .route("/api/admin/activities/{id}", delete(activities::remove))
        .route(
            "/api/admin/organizations",
            get(organizations::list).post(organizations::create),
        )
        .route("/api/admin/organizations/{id}", delete(organizations::remove))
        .route("/api/admin/news", get(news::list).post(news::create))
        .route("/api/admin/news/{id}", delete(news::remove))
        .route(
            "/api/admin/achievements",
            get(achievements::list).post(achievements::create),
        )
        .route("/api/admin/achievements/{id}", delete(achievements::remove))
        .layer(middleware::from_fn_with_state(
            RoleGate::new(state.clone(), ADMIN_ROLES),
            role_gate,
        ))
        .with_state(state.clone());

    // Account management is superadmin territory
    let superadmin_api = Router::new()
        .route("/api/admin/users", get(users::list).post(users::create))
        .route("/api/admin/users/{id}", delete(users::remove))
        .route("/api/admin/users/{id}/active", put(users::set_active))
        .route("/api/admin/users/{id}/password", put(users::update_password))
        .layer(middleware::from_fn_with_state(
            RoleGate::new(state.clone(), "superadmin"),
            role_gate,
        ))
        .with_state(state.clone());

    // Role-guarded dashboard pages
    let superadmin_dashboard = Router::new()
        .route("/superadmin/dashboard", get(dashboard::superadmin))
        .layer(middleware::from_fn_with_state(
            RoleGate::new(state.clone(), "superadmin"),
            role_gate,
        ))
        .with_state(state.clone());

    let admin_dashboard = Router::new()
        .route("/admin/dashboard", get(dashboard::admin))
        .layer(middleware::from_fn_with_state(
            RoleGate::new(state.clone(), ADMIN_ROLES),
            role_gate,
        ))
        .with_state(state.clone());

    let mahasiswa_dashboard = Router::new()
        .route("/mahasiswa/dashboard", get(dashboard::mahasiswa))
        .layer(middleware::from_fn_with_state(
            RoleGate::new(state.clone(), "mahasiswa"),
            role_gate,
        ))
        .with_state(state.clone());

    // Login page serves the SPA shell behind the guest gate
    let login_page = Router::new()
        .route("/login", get(static_files::static_handler))
        .layer(middleware::from_fn_with_state(state.clone(), guest_gate));

    Router::new()
        .merge(auth_routes)
        .merge(portal_api)
        .merge(admin_api)
        .merge(superadmin_api)
        .merge(superadmin_dashboard)
        .merge(admin_dashboard)
        .merge(mahasiswa_dashboard)
        .merge(login_page)
        .fallback(static_files::static_handler)
        .layer(Extension(auth_state))
        .layer(TraceLayer::new_for_http())
}

/// Portal-db errors crossing into the JSON surface.
pub(crate) fn map_db(e: PortalError) -> AuthError {
    match e {
        PortalError::NotFound(msg) => AuthError::NotFound(msg),
        PortalError::InvalidInput(msg) | PortalError::InvalidStatus(msg) => {
            AuthError::InvalidInput(msg)
        }
        other => AuthError::Database(other.to_string()),
    }
}

pub(crate) fn claims_identity(user: &simawa_auth::session::AuthUser) -> IdentityResponse {
    let label = Role::parse(&user.role).map(|r| r.label()).unwrap_or("");
    IdentityResponse {
        id: user.user_id.clone(),
        username: user.username.clone(),
        name: user.name.clone(),
        role: user.role.clone(),
        role_label: label.to_string(),
    }
}
