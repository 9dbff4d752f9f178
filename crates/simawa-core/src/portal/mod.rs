pub mod queries;
pub mod schema;

pub use queries::PortalDb;
