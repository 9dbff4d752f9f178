mod guard;
mod models;
mod routes;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};

use simawa_auth::store::{SqliteUserStore, UserStore};
use simawa_core::PortalDb;
use simawa_core::config::PortalConfig;

use state::AppState;

/// Start the portal server. Opens its own connections to the shared
/// SQLite file (accounts + content live side by side).
pub async fn start_web_server(config: PortalConfig) -> anyhow::Result<()> {
    let db = PortalDb::open(Path::new(&config.portal.db_path))?;
    let users = SqliteUserStore::open(&config.portal.db_path)?;
    users.migrate().await?;

    let state = Arc::new(AppState {
        db: Mutex::new(db),
        users: Arc::new(users),
        config: config.clone(),
    });

    let app = routes::build_router(state);

    let addr: SocketAddr = config.web.listen_addr.parse()?;
    tracing::info!("Starting SIMAWA portal on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
