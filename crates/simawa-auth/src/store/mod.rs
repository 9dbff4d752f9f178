pub mod seed;
pub mod sqlite;

pub use sqlite::SqliteUserStore;

use async_trait::async_trait;

use crate::error::AuthError;
use crate::role::Role;
use crate::types::User;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(
        &self,
        username: &str,
        name: &str,
        role: Role,
        password_hash: &str,
    ) -> Result<User, AuthError>;
    async fn get_user_by_id(&self, id: &str) -> Result<User, AuthError>;
    async fn get_user_by_username(&self, username: &str) -> Result<User, AuthError>;
    async fn list_users(&self) -> Result<Vec<User>, AuthError>;
    async fn set_active(&self, id: &str, is_active: bool) -> Result<User, AuthError>;
    async fn update_password(&self, id: &str, password_hash: &str) -> Result<(), AuthError>;
    async fn delete_user(&self, id: &str) -> Result<(), AuthError>;
    async fn get_password_hash(&self, user_id: &str) -> Result<String, AuthError>;
    async fn user_count(&self) -> Result<u64, AuthError>;

    // Lifecycle
    async fn migrate(&self) -> Result<(), AuthError>;
}
