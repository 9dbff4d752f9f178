use thiserror::Error;

pub type Result<T> = std::result::Result<T, PortalError>;

#[derive(Debug, Error)]
pub enum PortalError {
    // IO
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Config
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found at {0} — run `simawa init` first")]
    ConfigNotFound(String),

    // Database
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    // Serialization
    #[error("TOML parse error: {0}")]
    TomlDe(String),

    #[error("TOML serialize error: {0}")]
    TomlSer(String),
}
