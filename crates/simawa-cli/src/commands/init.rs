use std::path::Path;

use simawa_core::config::PortalConfig;

pub fn run(base_dir: &Path) -> anyhow::Result<()> {
    let path = PortalConfig::default_path(base_dir);
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    let config = PortalConfig::default_config(base_dir);
    config.save(&path)?;

    println!("Wrote {}", path.display());
    println!("Database path: {}", config.portal.db_path);
    println!("Run `simawa seed` to create tables and default accounts.");
    Ok(())
}
