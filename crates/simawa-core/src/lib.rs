pub mod config;
pub mod error;
pub mod portal;
pub mod types;

pub use error::{PortalError, Result};
pub use portal::PortalDb;
