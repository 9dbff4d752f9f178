use std::path::Path;

use simawa_core::config::PortalConfig;

pub async fn run(base_dir: &Path) -> anyhow::Result<()> {
    let config = PortalConfig::load(&PortalConfig::default_path(base_dir))?;
    tracing::info!("using database at {}", config.portal.db_path);
    simawa_web::start_web_server(config).await
}
