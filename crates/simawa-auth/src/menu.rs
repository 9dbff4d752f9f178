use serde::Serialize;

use crate::permissions::has_permission;
use crate::role::Role;

/// One sidebar entry. The rendering layer turns these into markup; this
/// side only decides which entries exist and in what order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub name: &'static str,
    pub route: &'static str,
    pub icon: &'static str,
    pub visible: bool,
}

/// Fixed (feature, name, route, icon) table. Menu order follows this
/// table, not the grant order of any role.
const MENU_FEATURES: &[(&str, &str, &str, &str)] = &[
    ("pengumuman", "Pengumuman", "admin.announcement.index", "bell"),
    ("layanan", "Layanan", "admin.service.index", "briefcase"),
    ("kegiatan", "Kegiatan", "admin.activity.index", "calendar"),
    ("organisasi", "Organisasi", "admin.organization.index", "users"),
    ("news", "Berita", "admin.news.index", "newspaper"),
    ("achievements", "Prestasi", "admin.achievement.index", "trophy"),
];

/// Derive the sidebar for a role. Dashboard always leads, pointing at the
/// role's canonical dashboard; the rest follow `MENU_FEATURES` order
/// filtered through the permission table. Pure: same role in, same menu
/// out.
pub fn build_menu(role: &str) -> Vec<MenuItem> {
    let dashboard_route = match Role::parse(role) {
        Some(r) => r.dashboard_route(),
        None => "login",
    };

    let mut items = vec![MenuItem {
        name: "Dashboard",
        route: dashboard_route,
        icon: "home",
        visible: true,
    }];

    for &(feature, name, route, icon) in MENU_FEATURES {
        if has_permission(role, feature) {
            items.push(MenuItem {
                name,
                route,
                icon,
                visible: true,
            });
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(role: &str) -> Vec<&'static str> {
        build_menu(role).iter().map(|m| m.name).collect()
    }

    #[test]
    fn kemahasiswaan_menu() {
        assert_eq!(
            names("kemahasiswaan"),
            vec!["Dashboard", "Pengumuman", "Layanan", "Berita", "Prestasi"]
        );
    }

    #[test]
    fn adminbem_menu() {
        assert_eq!(
            names("adminbem"),
            vec!["Dashboard", "Pengumuman", "Layanan", "Kegiatan", "Berita"]
        );
    }

    #[test]
    fn adminmpm_menu() {
        assert_eq!(
            names("adminmpm"),
            vec!["Dashboard", "Pengumuman", "Layanan", "Organisasi"]
        );
    }

    #[test]
    fn superadmin_gets_everything() {
        let menu = build_menu("superadmin");
        assert_eq!(menu.len(), 7);
        assert_eq!(menu[0].name, "Dashboard");
        assert_eq!(menu[0].route, "superadmin.dashboard");
    }

    #[test]
    fn mahasiswa_gets_dashboard_only() {
        let menu = build_menu("mahasiswa");
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].route, "mahasiswa.dashboard");
        assert!(menu[0].visible);
    }

    #[test]
    fn unknown_role_gets_dashboard_only() {
        assert_eq!(names("dosen"), vec!["Dashboard"]);
    }

    #[test]
    fn build_menu_is_pure() {
        assert_eq!(build_menu("adminbem"), build_menu("adminbem"));
    }
}
