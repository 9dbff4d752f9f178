use std::path::Path;

use simawa_auth::store::{SqliteUserStore, UserStore, seed};
use simawa_core::PortalDb;
use simawa_core::config::PortalConfig;

pub async fn run(base_dir: &Path) -> anyhow::Result<()> {
    let config = PortalConfig::load(&PortalConfig::default_path(base_dir))?;

    // Content tables
    PortalDb::open(Path::new(&config.portal.db_path))?;

    // Accounts
    let store = SqliteUserStore::open(&config.portal.db_path)?;
    store.migrate().await?;
    seed::seed_defaults(&store).await?;

    println!(
        "Seeded default accounts ({} total users)",
        store.user_count().await?
    );
    Ok(())
}
