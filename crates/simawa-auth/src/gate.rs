use crate::role::{RequiredRoles, dashboard_path};

/// Outcome of a gate evaluation for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through to its handler.
    Pass,
    /// No identity on a guarded route; send to the login entry point.
    RedirectLogin,
    /// Authenticated but not admitted; send to the identity's own
    /// canonical dashboard.
    RedirectDashboard(&'static str),
}

/// Role gate. Decides a guarded request from the identity's role (if
/// any), the route group's required roles, and the request path.
///
/// A non-admitted identity whose own dashboard IS the requested path
/// passes anyway: its dashboard must stay reachable even when that route
/// carries a narrower role requirement, or the redirect would loop.
pub fn evaluate(identity_role: Option<&str>, required: &RequiredRoles, path: &str) -> GateDecision {
    let Some(role) = identity_role else {
        return GateDecision::RedirectLogin;
    };

    if required.admits(role) {
        return GateDecision::Pass;
    }

    let own = dashboard_path(role);
    if path == own {
        // Own-dashboard escape
        return GateDecision::Pass;
    }

    GateDecision::RedirectDashboard(own)
}

/// Guest gate, applied to the login page only: an authenticated identity
/// is bounced straight to its dashboard, anonymous requests pass.
pub fn evaluate_guest(identity_role: Option<&str>) -> GateDecision {
    match identity_role {
        Some(role) => GateDecision::RedirectDashboard(dashboard_path(role)),
        None => GateDecision::Pass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::RequiredRoles;

    #[test]
    fn unauthenticated_always_goes_to_login() {
        let required = RequiredRoles::parse("superadmin,kemahasiswaan,adminbem,adminmpm");
        assert_eq!(
            evaluate(None, &required, "/admin/dashboard"),
            GateDecision::RedirectLogin
        );
        assert_eq!(
            evaluate(None, &RequiredRoles::parse("mahasiswa"), "/mahasiswa/dashboard"),
            GateDecision::RedirectLogin
        );
    }

    #[test]
    fn admitted_role_passes() {
        let required = RequiredRoles::parse("adminbem,adminmpm");
        assert_eq!(
            evaluate(Some("adminbem"), &required, "/api/admin/activities"),
            GateDecision::Pass
        );
    }

    #[test]
    fn mahasiswa_is_sent_to_own_dashboard_not_403() {
        let required = RequiredRoles::parse("adminbem,adminmpm");
        assert_eq!(
            evaluate(Some("mahasiswa"), &required, "/api/admin/activities"),
            GateDecision::RedirectDashboard("/mahasiswa/dashboard")
        );
    }

    #[test]
    fn own_dashboard_escape_prevents_loop() {
        // /admin/dashboard guarded narrower than the roles that land there
        let required = RequiredRoles::parse("superadmin");
        assert_eq!(
            evaluate(Some("kemahasiswaan"), &required, "/admin/dashboard"),
            GateDecision::Pass
        );
        // but any other path still redirects
        assert_eq!(
            evaluate(Some("kemahasiswaan"), &required, "/superadmin/dashboard"),
            GateDecision::RedirectDashboard("/admin/dashboard")
        );
    }

    #[test]
    fn unknown_role_is_sent_to_root() {
        let required = RequiredRoles::parse("superadmin");
        assert_eq!(
            evaluate(Some("dosen"), &required, "/superadmin/dashboard"),
            GateDecision::RedirectDashboard("/")
        );
    }

    #[test]
    fn guest_gate_bounces_authenticated() {
        assert_eq!(
            evaluate_guest(Some("mahasiswa")),
            GateDecision::RedirectDashboard("/mahasiswa/dashboard")
        );
        assert_eq!(
            evaluate_guest(Some("superadmin")),
            GateDecision::RedirectDashboard("/superadmin/dashboard")
        );
        assert_eq!(evaluate_guest(None), GateDecision::Pass);
    }
}
