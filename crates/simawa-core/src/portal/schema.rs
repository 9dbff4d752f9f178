use rusqlite::Connection;

use crate::error::Result;

/// Run all migrations on the portal content database.
pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode=WAL;
        PRAGMA foreign_keys=ON;

        CREATE TABLE IF NOT EXISTS announcements (
            id          TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            body        TEXT NOT NULL,
            status      TEXT NOT NULL DEFAULT 'draft',
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS service_requests (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL,
            subject     TEXT NOT NULL,
            detail      TEXT NOT NULL,
            status      TEXT NOT NULL DEFAULT 'pending',
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS scholarships (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            provider    TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            quota       INTEGER NOT NULL DEFAULT 0,
            opens_at    TEXT NOT NULL,
            closes_at   TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS activities (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            location    TEXT NOT NULL DEFAULT '',
            starts_at   TEXT NOT NULL,
            ends_at     TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS organizations (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL UNIQUE,
            abbrev      TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            chairperson TEXT NOT NULL DEFAULT '',
            period      TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS news (
            id           TEXT PRIMARY KEY,
            title        TEXT NOT NULL,
            body         TEXT NOT NULL,
            published_at TEXT,
            created_at   TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS achievements (
            id           TEXT PRIMARY KEY,
            student_name TEXT NOT NULL,
            nim          TEXT NOT NULL,
            title        TEXT NOT NULL,
            level        TEXT NOT NULL DEFAULT 'internal',
            year         INTEGER NOT NULL,
            created_at   TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_announcements_status ON announcements(status);
        CREATE INDEX IF NOT EXISTS idx_service_requests_user ON service_requests(user_id);
        CREATE INDEX IF NOT EXISTS idx_activities_starts ON activities(starts_at);
        ",
    )?;
    Ok(())
}
