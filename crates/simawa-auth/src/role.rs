use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of portal roles. Stored as the lowercase string form;
/// assignment is immutable once a user is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Superadmin,
    Kemahasiswaan,
    Adminbem,
    Adminmpm,
    Mahasiswa,
}

impl Role {
    pub const ALL: &[Role] = &[
        Role::Superadmin,
        Role::Kemahasiswaan,
        Role::Adminbem,
        Role::Adminmpm,
        Role::Mahasiswa,
    ];

    /// Parse a role string. Case-insensitive; surrounding whitespace is
    /// ignored; unknown strings yield `None`, never an error.
    pub fn parse(s: &str) -> Option<Role> {
        match s.trim().to_ascii_lowercase().as_str() {
            "superadmin" => Some(Role::Superadmin),
            "kemahasiswaan" => Some(Role::Kemahasiswaan),
            "adminbem" => Some(Role::Adminbem),
            "adminmpm" => Some(Role::Adminmpm),
            "mahasiswa" => Some(Role::Mahasiswa),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::Kemahasiswaan => "kemahasiswaan",
            Role::Adminbem => "adminbem",
            Role::Adminmpm => "adminmpm",
            Role::Mahasiswa => "mahasiswa",
        }
    }

    /// Display label used by the frontend shell.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Superadmin => "Super Admin",
            Role::Kemahasiswaan => "Kemahasiswaan",
            Role::Adminbem => "Admin BEM",
            Role::Adminmpm => "Admin MPM",
            Role::Mahasiswa => "Mahasiswa",
        }
    }

    /// Logical name of this role's canonical dashboard route. Both the
    /// role gate and the guest gate consult this one mapping; it is
    /// defined nowhere else.
    pub fn dashboard_route(&self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin.dashboard",
            Role::Kemahasiswaan | Role::Adminbem | Role::Adminmpm => "admin.dashboard",
            Role::Mahasiswa => "mahasiswa.dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolve a logical route name to its request path.
pub fn route_path(name: &str) -> &'static str {
    match name {
        "login" => "/login",
        "superadmin.dashboard" => "/superadmin/dashboard",
        "admin.dashboard" => "/admin/dashboard",
        "mahasiswa.dashboard" => "/mahasiswa/dashboard",
        _ => "/",
    }
}

/// Canonical dashboard path for a raw role string. Unknown roles land at
/// the site root.
pub fn dashboard_path(role: &str) -> &'static str {
    match Role::parse(role) {
        Some(r) => route_path(r.dashboard_route()),
        None => "/",
    }
}

/// Required-roles list attached to a guarded route group, parsed from a
/// comma-separated spec like `"adminbem, adminmpm"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredRoles {
    roles: Vec<Role>,
}

impl RequiredRoles {
    /// Entries are trimmed and matched case-insensitively; unknown entries
    /// are dropped.
    pub fn parse(spec: &str) -> Self {
        Self {
            roles: spec.split(',').filter_map(Role::parse).collect(),
        }
    }

    pub fn admits(&self, role: &str) -> bool {
        Role::parse(role).is_some_and(|r| self.roles.contains(&r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::parse("SuperAdmin"), Some(Role::Superadmin));
        assert_eq!(Role::parse("  MAHASISWA "), Some(Role::Mahasiswa));
        assert_eq!(Role::parse("dosen"), None);
    }

    #[test]
    fn dashboard_mapping_is_total() {
        assert_eq!(dashboard_path("superadmin"), "/superadmin/dashboard");
        assert_eq!(dashboard_path("kemahasiswaan"), "/admin/dashboard");
        assert_eq!(dashboard_path("adminbem"), "/admin/dashboard");
        assert_eq!(dashboard_path("adminmpm"), "/admin/dashboard");
        assert_eq!(dashboard_path("mahasiswa"), "/mahasiswa/dashboard");
        assert_eq!(dashboard_path("dosen"), "/");
    }

    #[test]
    fn required_roles_list() {
        let required = RequiredRoles::parse("adminbem, ADMINMPM");
        assert!(required.admits("adminbem"));
        assert!(required.admits("AdminMPM"));
        assert!(!required.admits("mahasiswa"));
        assert!(!required.admits("dosen"));
    }

    #[test]
    fn unknown_entries_are_dropped() {
        let required = RequiredRoles::parse("superadmin, staff,,");
        assert!(required.admits("superadmin"));
        assert!(!required.admits("staff"));
    }
}
