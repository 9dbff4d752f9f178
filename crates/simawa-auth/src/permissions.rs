use crate::role::Role;

/// Feature flags gating the portal's functional areas.
pub const FEATURES: &[(&str, &str)] = &[
    ("pengumuman", "Manage announcements"),
    ("layanan", "Handle student service requests"),
    ("beasiswa", "Manage scholarships"),
    ("kegiatan", "Manage activities"),
    ("organisasi", "Manage student organizations"),
    ("news", "Publish news"),
    ("achievements", "Record student achievements"),
];

impl Role {
    /// Features granted to this role. The table is fixed at compile time;
    /// anything not listed is denied.
    pub fn grants(&self) -> &'static [&'static str] {
        match self {
            Role::Superadmin => &[
                "pengumuman",
                "layanan",
                "beasiswa",
                "kegiatan",
                "organisasi",
                "news",
                "achievements",
            ],
            Role::Kemahasiswaan => &["pengumuman", "layanan", "beasiswa", "news", "achievements"],
            Role::Adminbem => &["pengumuman", "layanan", "kegiatan", "news"],
            Role::Adminmpm => &["pengumuman", "layanan", "organisasi"],
            Role::Mahasiswa => &[],
        }
    }
}

/// Feature grants for a raw role string. Unknown roles get the empty set.
pub fn permissions(role: &str) -> &'static [&'static str] {
    match Role::parse(role) {
        Some(r) => r.grants(),
        None => &[],
    }
}

/// True iff `role` is granted `feature`. Unknown role, unknown feature,
/// or an ungranted feature all come back false.
pub fn has_permission(role: &str, feature: &str) -> bool {
    permissions(role).iter().any(|f| *f == feature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_role_has_no_permissions() {
        assert!(permissions("dosen").is_empty());
        for (feature, _) in FEATURES {
            assert!(!has_permission("dosen", feature));
        }
    }

    #[test]
    fn unknown_feature_is_denied() {
        assert!(!has_permission("superadmin", "keuangan"));
    }

    #[test]
    fn role_lookup_is_case_insensitive() {
        assert!(has_permission("KEMAHASISWAAN", "beasiswa"));
        assert!(has_permission("AdminBem", "kegiatan"));
    }

    #[test]
    fn kemahasiswaan_grants() {
        assert!(has_permission("kemahasiswaan", "pengumuman"));
        assert!(has_permission("kemahasiswaan", "layanan"));
        assert!(has_permission("kemahasiswaan", "beasiswa"));
        assert!(has_permission("kemahasiswaan", "news"));
        assert!(has_permission("kemahasiswaan", "achievements"));
        assert!(!has_permission("kemahasiswaan", "kegiatan"));
        assert!(!has_permission("kemahasiswaan", "organisasi"));
    }

    #[test]
    fn adminbem_grants() {
        assert!(has_permission("adminbem", "kegiatan"));
        assert!(!has_permission("adminbem", "organisasi"));
        assert!(!has_permission("adminbem", "achievements"));
        assert!(!has_permission("adminbem", "beasiswa"));
    }

    #[test]
    fn adminmpm_grants() {
        assert!(has_permission("adminmpm", "organisasi"));
        assert!(!has_permission("adminmpm", "kegiatan"));
        assert!(!has_permission("adminmpm", "news"));
    }

    #[test]
    fn mahasiswa_has_no_admin_features() {
        assert!(permissions("mahasiswa").is_empty());
    }
}
