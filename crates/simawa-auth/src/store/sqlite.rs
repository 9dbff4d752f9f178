use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use super::UserStore;
use crate::error::AuthError;
use crate::role::Role;
use crate::types::User;

pub struct SqliteUserStore {
    conn: Mutex<Connection>,
}

impl SqliteUserStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn open(path: &str) -> Result<Self, AuthError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Ok(Self::new(conn))
    }

    pub fn open_in_memory() -> Result<Self, AuthError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self::new(conn))
    }
}

const MIGRATE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT UNIQUE NOT NULL,
    name TEXT NOT NULL,
    role TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_users_role ON users(role);
"#;

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let role: String = row.get(3)?;
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        name: row.get(2)?,
        // A role string in our own table always parses; fail closed to
        // the least-privileged role if a migration ever leaves junk.
        role: Role::parse(&role).unwrap_or(Role::Mahasiswa),
        is_active: row.get::<_, i64>(4)? != 0,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn create_user(
        &self,
        username: &str,
        name: &str,
        role: Role,
        password_hash: &str,
    ) -> Result<User, AuthError> {
        let conn = self.conn.lock().unwrap();
        let id = Uuid::now_v7().to_string();
        let result = conn.execute(
            "INSERT INTO users (id, username, name, role, password_hash) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, username, name, role.as_str(), password_hash],
        );
        match result {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(AuthError::Duplicate(format!("username {username}")));
            }
            Err(e) => return Err(e.into()),
        }

        conn.query_row(
            "SELECT id, username, name, role, is_active, created_at, updated_at FROM users WHERE id = ?1",
            params![id],
            row_to_user,
        )
        .map_err(Into::into)
    }

    async fn get_user_by_id(&self, id: &str) -> Result<User, AuthError> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, username, name, role, is_active, created_at, updated_at FROM users WHERE id = ?1",
            params![id],
            row_to_user,
        )
        .optional()?
        .ok_or_else(|| AuthError::NotFound(format!("user {id}")))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User, AuthError> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, username, name, role, is_active, created_at, updated_at FROM users WHERE username = ?1",
            params![username],
            row_to_user,
        )
        .optional()?
        .ok_or_else(|| AuthError::NotFound(format!("user {username}")))
    }

    async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, username, name, role, is_active, created_at, updated_at FROM users ORDER BY username",
        )?;
        let rows = stmt.query_map([], row_to_user)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    async fn set_active(&self, id: &str, is_active: bool) -> Result<User, AuthError> {
        {
            let conn = self.conn.lock().unwrap();
            let changed = conn.execute(
                "UPDATE users SET is_active = ?2, updated_at = datetime('now') WHERE id = ?1",
                params![id, is_active as i64],
            )?;
            if changed == 0 {
                return Err(AuthError::NotFound(format!("user {id}")));
            }
        }
        self.get_user_by_id(id).await
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> Result<(), AuthError> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE users SET password_hash = ?2, updated_at = datetime('now') WHERE id = ?1",
            params![id, password_hash],
        )?;
        if changed == 0 {
            return Err(AuthError::NotFound(format!("user {id}")));
        }
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> Result<(), AuthError> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(AuthError::NotFound(format!("user {id}")));
        }
        Ok(())
    }

    async fn get_password_hash(&self, user_id: &str) -> Result<String, AuthError> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT password_hash FROM users WHERE id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| AuthError::NotFound(format!("user {user_id}")))
    }

    async fn user_count(&self) -> Result<u64, AuthError> {
        let conn = self.conn.lock().unwrap();
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }

    async fn migrate(&self) -> Result<(), AuthError> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(MIGRATE_SQL)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::{hash_password, verify_password};

    async fn store() -> SqliteUserStore {
        let s = SqliteUserStore::open_in_memory().unwrap();
        s.migrate().await.unwrap();
        s
    }

    #[tokio::test]
    async fn create_and_fetch_user() {
        let s = store().await;
        let user = s
            .create_user("budi", "Budi Santoso", Role::Mahasiswa, "hash")
            .await
            .unwrap();
        assert_eq!(user.role, Role::Mahasiswa);
        assert!(user.is_active);

        let by_name = s.get_user_by_username("budi").await.unwrap();
        assert_eq!(by_name.id, user.id);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let s = store().await;
        s.create_user("budi", "Budi", Role::Mahasiswa, "h").await.unwrap();
        let err = s
            .create_user("budi", "Budi Lain", Role::Adminbem, "h")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Duplicate(_)));
    }

    #[tokio::test]
    async fn password_flow() {
        let s = store().await;
        let hash = hash_password("rahasia").unwrap();
        let user = s
            .create_user("siti", "Siti Aminah", Role::Kemahasiswaan, &hash)
            .await
            .unwrap();

        let stored = s.get_password_hash(&user.id).await.unwrap();
        assert!(verify_password("rahasia", &stored).unwrap());
        assert!(!verify_password("salah", &stored).unwrap());
    }

    #[tokio::test]
    async fn deactivate_user() {
        let s = store().await;
        let user = s
            .create_user("agus", "Agus", Role::Adminmpm, "h")
            .await
            .unwrap();
        let updated = s.set_active(&user.id, false).await.unwrap();
        assert!(!updated.is_active);
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let s = store().await;
        assert!(matches!(
            s.get_user_by_id("nope").await,
            Err(AuthError::NotFound(_))
        ));
    }
}
