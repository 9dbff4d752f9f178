use crate::error::{PortalError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level SIMAWA configuration stored as TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    pub portal: PortalSettings,
    #[serde(default)]
    pub web: WebSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalSettings {
    /// Path to the SQLite database (accounts + portal content).
    pub db_path: String,
    /// Display name used by the frontend shell.
    #[serde(default = "default_site_name")]
    pub site_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSettings {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session lifetime in seconds (default: 24h).
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            jwt_secret: default_jwt_secret(),
            session_ttl_secs: default_session_ttl(),
        }
    }
}

fn default_site_name() -> String {
    "SIMAWA".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_jwt_secret() -> String {
    "simawa-jwt-secret-change-me".to_string()
}

fn default_session_ttl() -> u64 {
    86400
}

impl PortalConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PortalError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| PortalError::TomlDe(e.to_string()))
    }

    /// Save config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| PortalError::TomlSer(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config for `simawa init`.
    pub fn default_config(base_dir: &Path) -> Self {
        Self {
            portal: PortalSettings {
                db_path: base_dir.join("simawa.db").display().to_string(),
                site_name: default_site_name(),
            },
            web: WebSettings::default(),
        }
    }

    /// Resolve the config file path: `<base_dir>/simawa.toml`
    pub fn default_path(base_dir: &Path) -> PathBuf {
        base_dir.join("simawa.toml")
    }

    /// Resolve the default simawa home directory: `~/.simawa`
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|h| h.join(".simawa"))
            .ok_or_else(|| PortalError::Config("Cannot determine home directory".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn roundtrip_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("simawa.toml");
        let config = PortalConfig::default_config(tmp.path());
        config.save(&path).unwrap();
        let loaded = PortalConfig::load(&path).unwrap();
        assert_eq!(loaded.portal.site_name, "SIMAWA");
        assert_eq!(loaded.web.session_ttl_secs, 86400);
    }

    #[test]
    fn load_nonexistent_returns_error() {
        let result = PortalConfig::load(Path::new("/nonexistent/simawa.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn missing_web_section_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("simawa.toml");
        std::fs::write(&path, "[portal]\ndb_path = \"/tmp/simawa.db\"\n").unwrap();
        let loaded = PortalConfig::load(&path).unwrap();
        assert_eq!(loaded.web.listen_addr, "0.0.0.0:8080");
    }
}
