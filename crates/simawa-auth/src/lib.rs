pub mod error;
pub mod gate;
pub mod jwt;
pub mod menu;
pub mod password;
pub mod permissions;
pub mod role;
pub mod session;
pub mod store;
pub mod types;

pub use error::AuthError;
pub use gate::{GateDecision, evaluate, evaluate_guest};
pub use jwt::{SessionClaims, create_session, verify_session};
pub use menu::{MenuItem, build_menu};
pub use password::{hash_password, verify_password};
pub use permissions::{FEATURES, has_permission, permissions};
pub use role::{RequiredRoles, Role, dashboard_path, route_path};
pub use session::{AuthState, AuthUser, SESSION_COOKIE};
pub use store::{SqliteUserStore, UserStore};
pub use types::*;
