use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use simawa_auth::gate::{GateDecision, evaluate, evaluate_guest};
use simawa_auth::role::{RequiredRoles, route_path};
use simawa_auth::session::identity_from_headers;

use crate::state::AppState;

/// State for one guarded route group: the shared app state plus the
/// group's required-roles spec.
#[derive(Clone)]
pub struct RoleGate {
    pub state: Arc<AppState>,
    pub required: RequiredRoles,
}

impl RoleGate {
    pub fn new(state: Arc<AppState>, spec: &str) -> Self {
        Self {
            state,
            required: RequiredRoles::parse(spec),
        }
    }
}

/// Role gate middleware. All outcomes are pass-through or redirect;
/// unauthorized never surfaces as an error page here.
pub async fn role_gate(State(gate): State<RoleGate>, request: Request, next: Next) -> Response {
    let claims = identity_from_headers(request.headers(), gate.state.jwt_secret());
    let role = claims.as_ref().map(|c| c.role.as_str());

    match evaluate(role, &gate.required, request.uri().path()) {
        GateDecision::Pass => next.run(request).await,
        GateDecision::RedirectLogin => Redirect::to(route_path("login")).into_response(),
        GateDecision::RedirectDashboard(path) => Redirect::to(path).into_response(),
    }
}

/// Guest gate middleware for the login page.
pub async fn guest_gate(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let claims = identity_from_headers(request.headers(), state.jwt_secret());

    match evaluate_guest(claims.as_ref().map(|c| c.role.as_str())) {
        GateDecision::Pass => next.run(request).await,
        GateDecision::RedirectDashboard(path) => Redirect::to(path).into_response(),
        GateDecision::RedirectLogin => Redirect::to(route_path("login")).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode, header};
    use axum::routing::get;
    use axum::{Router, middleware};
    use simawa_auth::jwt::create_session;
    use simawa_auth::store::SqliteUserStore;
    use simawa_core::PortalDb;
    use simawa_core::config::PortalConfig;
    use tower::ServiceExt;

    async fn test_state() -> Arc<AppState> {
        let db = PortalDb::open_in_memory().unwrap();
        let users = SqliteUserStore::open_in_memory().unwrap();
        simawa_auth::store::UserStore::migrate(&users).await.unwrap();
        let config = PortalConfig::default_config(std::path::Path::new("/tmp/simawa-test"));
        Arc::new(AppState {
            db: std::sync::Mutex::new(db),
            users: Arc::new(users),
            config,
        })
    }

    fn bearer(state: &AppState, role: &str) -> String {
        let token = create_session("u-1", role, role, role, state.jwt_secret(), 3600).unwrap();
        format!("Bearer {token}")
    }

    async fn ok() -> &'static str {
        "ok"
    }

    fn gated(state: Arc<AppState>, path: &str, spec: &str) -> Router {
        Router::new()
            .route(path, get(ok))
            .layer(middleware::from_fn_with_state(
                RoleGate::new(state, spec),
                role_gate,
            ))
    }

    fn location(res: &axum::response::Response) -> &str {
        res.headers()
            .get(header::LOCATION)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("")
    }

    #[tokio::test]
    async fn unauthenticated_is_redirected_to_login() {
        let state = test_state().await;
        let app = gated(
            state,
            "/admin/dashboard",
            "superadmin,kemahasiswaan,adminbem,adminmpm",
        );

        let res = app
            .oneshot(
                HttpRequest::get("/admin/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(res.status().is_redirection());
        assert_eq!(location(&res), "/login");
    }

    #[tokio::test]
    async fn wrong_role_is_redirected_to_own_dashboard() {
        let state = test_state().await;
        let auth = bearer(&state, "mahasiswa");
        let app = gated(state, "/api/admin/activities", "adminbem,adminmpm");

        let res = app
            .oneshot(
                HttpRequest::get("/api/admin/activities")
                    .header(header::AUTHORIZATION, auth)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(res.status().is_redirection());
        assert_eq!(location(&res), "/mahasiswa/dashboard");
    }

    #[tokio::test]
    async fn own_dashboard_stays_reachable() {
        let state = test_state().await;
        let auth = bearer(&state, "kemahasiswaan");
        // guarded narrower than the roles whose dashboard this is
        let app = gated(state, "/admin/dashboard", "superadmin");

        let res = app
            .oneshot(
                HttpRequest::get("/admin/dashboard")
                    .header(header::AUTHORIZATION, auth)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn admitted_role_passes_through() {
        let state = test_state().await;
        let auth = bearer(&state, "adminbem");
        let app = gated(state, "/api/admin/activities", "adminbem,adminmpm");

        let res = app
            .oneshot(
                HttpRequest::get("/api/admin/activities")
                    .header(header::AUTHORIZATION, auth)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn guest_gate_bounces_authenticated_off_login() {
        let state = test_state().await;
        let auth = bearer(&state, "superadmin");
        let app = Router::new()
            .route("/login", get(ok))
            .layer(middleware::from_fn_with_state(state.clone(), guest_gate))
            .with_state(state);

        let res = app
            .clone()
            .oneshot(
                HttpRequest::get("/login")
                    .header(header::AUTHORIZATION, auth)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(res.status().is_redirection());
        assert_eq!(location(&res), "/superadmin/dashboard");

        let anon = app
            .oneshot(HttpRequest::get("/login").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(anon.status(), StatusCode::OK);
    }
}
