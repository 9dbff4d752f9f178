use std::path::Path;

use simawa_auth::password::hash_password;
use simawa_auth::role::Role;
use simawa_auth::store::{SqliteUserStore, UserStore};
use simawa_core::config::PortalConfig;

pub async fn run(
    base_dir: &Path,
    username: &str,
    name: &str,
    role: &str,
    password: &str,
) -> anyhow::Result<()> {
    let config = PortalConfig::load(&PortalConfig::default_path(base_dir))?;

    let Some(role) = Role::parse(role) else {
        anyhow::bail!(
            "unknown role '{role}' (expected superadmin, kemahasiswaan, adminbem, adminmpm, or mahasiswa)"
        );
    };

    let store = SqliteUserStore::open(&config.portal.db_path)?;
    store.migrate().await?;

    let hash = hash_password(password)?;
    let user = store.create_user(username, name, role, &hash).await?;

    println!("Created {} ({})", user.username, user.role);
    Ok(())
}
