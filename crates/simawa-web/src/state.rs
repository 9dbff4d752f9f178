use std::sync::{Arc, Mutex};

use simawa_auth::store::UserStore;
use simawa_core::PortalDb;
use simawa_core::config::PortalConfig;

pub struct AppState {
    pub db: Mutex<PortalDb>,
    pub users: Arc<dyn UserStore>,
    pub config: PortalConfig,
}

impl AppState {
    pub fn jwt_secret(&self) -> &str {
        &self.config.web.jwt_secret
    }
}
