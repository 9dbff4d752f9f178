use crate::error::AuthError;
use crate::password::hash_password;
use crate::role::Role;
use crate::store::UserStore;

/// Default accounts, one per role. Passwords are placeholders meant to be
/// rotated right after the first login.
const DEFAULT_ACCOUNTS: &[(&str, &str, Role, &str)] = &[
    ("superadmin", "Super Admin", Role::Superadmin, "superadmin"),
    (
        "kemahasiswaan",
        "Bagian Kemahasiswaan",
        Role::Kemahasiswaan,
        "kemahasiswaan",
    ),
    ("adminbem", "Admin BEM", Role::Adminbem, "adminbem"),
    ("adminmpm", "Admin MPM", Role::Adminmpm, "adminmpm"),
    ("mahasiswa", "Mahasiswa Contoh", Role::Mahasiswa, "mahasiswa"),
];

/// Create the default accounts (idempotent via username check).
pub async fn seed_defaults(store: &dyn UserStore) -> Result<(), AuthError> {
    for (username, name, role, password) in DEFAULT_ACCOUNTS {
        match store.get_user_by_username(username).await {
            Ok(_) => continue,
            Err(AuthError::NotFound(_)) => {
                let hash = hash_password(password)?;
                store.create_user(username, name, *role, &hash).await?;
                tracing::info!("seeded default account '{username}' ({role})");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteUserStore;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let store = SqliteUserStore::open_in_memory().unwrap();
        store.migrate().await.unwrap();

        seed_defaults(&store).await.unwrap();
        assert_eq!(store.user_count().await.unwrap(), 5);

        seed_defaults(&store).await.unwrap();
        assert_eq!(store.user_count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn seeded_roles_cover_the_table() {
        let store = SqliteUserStore::open_in_memory().unwrap();
        store.migrate().await.unwrap();
        seed_defaults(&store).await.unwrap();

        for role in Role::ALL {
            let user = store.get_user_by_username(role.as_str()).await.unwrap();
            assert_eq!(user.role, *role);
        }
    }
}
