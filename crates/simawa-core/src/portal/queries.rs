use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use uuid::Uuid;

use crate::error::{PortalError, Result};
use crate::types::{
    Achievement, AchievementLevel, Activity, Announcement, NewsPost, Organization, PublishStatus,
    Scholarship, ServiceRequest, ServiceStatus,
};

/// High-level interface for portal content database operations.
pub struct PortalDb {
    conn: Connection,
}

impl PortalDb {
    /// Open (or create) the portal database and run migrations.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        super::schema::migrate(&conn)?;
        tracing::debug!("portal database opened at {}", path.display());
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::schema::migrate(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // ── Announcements ──────────────────────────────────────────

    pub fn insert_announcement(
        &self,
        title: &str,
        body: &str,
        status: PublishStatus,
    ) -> Result<Announcement> {
        let id = Uuid::now_v7().to_string();
        self.conn.execute(
            "INSERT INTO announcements (id, title, body, status) VALUES (?1, ?2, ?3, ?4)",
            params![id, title, body, status.as_str()],
        )?;
        self.get_announcement(&id)
    }

    pub fn get_announcement(&self, id: &str) -> Result<Announcement> {
        self.conn
            .query_row(
                "SELECT id, title, body, status, created_at, updated_at
                 FROM announcements WHERE id = ?1",
                params![id],
                row_to_announcement,
            )
            .optional()?
            .ok_or_else(|| PortalError::NotFound(format!("announcement {id}")))
    }

    pub fn list_announcements(&self) -> Result<Vec<Announcement>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, body, status, created_at, updated_at
             FROM announcements ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map([], row_to_announcement)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    pub fn list_published_announcements(&self) -> Result<Vec<Announcement>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, body, status, created_at, updated_at
             FROM announcements WHERE status = 'published' ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map([], row_to_announcement)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    pub fn update_announcement(
        &self,
        id: &str,
        title: &str,
        body: &str,
        status: PublishStatus,
    ) -> Result<Announcement> {
        let changed = self.conn.execute(
            "UPDATE announcements
             SET title = ?2, body = ?3, status = ?4, updated_at = datetime('now')
             WHERE id = ?1",
            params![id, title, body, status.as_str()],
        )?;
        if changed == 0 {
            return Err(PortalError::NotFound(format!("announcement {id}")));
        }
        self.get_announcement(id)
    }

    pub fn delete_announcement(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM announcements WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(PortalError::NotFound(format!("announcement {id}")));
        }
        Ok(())
    }

    pub fn count_announcements(&self) -> Result<u64> {
        let count: u64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM announcements", [], |row| row.get(0))?;
        Ok(count)
    }

    // ── Service requests (layanan) ─────────────────────────────

    pub fn insert_service_request(
        &self,
        user_id: &str,
        subject: &str,
        detail: &str,
    ) -> Result<ServiceRequest> {
        let id = Uuid::now_v7().to_string();
        self.conn.execute(
            "INSERT INTO service_requests (id, user_id, subject, detail) VALUES (?1, ?2, ?3, ?4)",
            params![id, user_id, subject, detail],
        )?;
        self.get_service_request(&id)
    }

    pub fn get_service_request(&self, id: &str) -> Result<ServiceRequest> {
        self.conn
            .query_row(
                "SELECT id, user_id, subject, detail, status, created_at, updated_at
                 FROM service_requests WHERE id = ?1",
                params![id],
                row_to_service_request,
            )
            .optional()?
            .ok_or_else(|| PortalError::NotFound(format!("service request {id}")))
    }

    pub fn list_service_requests(&self) -> Result<Vec<ServiceRequest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, subject, detail, status, created_at, updated_at
             FROM service_requests ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map([], row_to_service_request)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    pub fn list_service_requests_for_user(&self, user_id: &str) -> Result<Vec<ServiceRequest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, subject, detail, status, created_at, updated_at
             FROM service_requests WHERE user_id = ?1 ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map(params![user_id], row_to_service_request)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    pub fn update_service_status(&self, id: &str, status: ServiceStatus) -> Result<ServiceRequest> {
        let changed = self.conn.execute(
            "UPDATE service_requests
             SET status = ?2, updated_at = datetime('now')
             WHERE id = ?1",
            params![id, status.as_str()],
        )?;
        if changed == 0 {
            return Err(PortalError::NotFound(format!("service request {id}")));
        }
        self.get_service_request(id)
    }

    pub fn count_pending_services(&self) -> Result<u64> {
        let count: u64 = self.conn.query_row(
            "SELECT COUNT(*) FROM service_requests WHERE status = 'pending'",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ── Scholarships (beasiswa) ────────────────────────────────

    pub fn insert_scholarship(
        &self,
        name: &str,
        provider: &str,
        description: &str,
        quota: u32,
        opens_at: &str,
        closes_at: &str,
    ) -> Result<Scholarship> {
        let id = Uuid::now_v7().to_string();
        self.conn.execute(
            "INSERT INTO scholarships (id, name, provider, description, quota, opens_at, closes_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![id, name, provider, description, quota, opens_at, closes_at],
        )?;
        self.get_scholarship(&id)
    }

    pub fn get_scholarship(&self, id: &str) -> Result<Scholarship> {
        self.conn
            .query_row(
                "SELECT id, name, provider, description, quota, opens_at, closes_at, created_at
                 FROM scholarships WHERE id = ?1",
                params![id],
                row_to_scholarship,
            )
            .optional()?
            .ok_or_else(|| PortalError::NotFound(format!("scholarship {id}")))
    }

    pub fn list_scholarships(&self) -> Result<Vec<Scholarship>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, provider, description, quota, opens_at, closes_at, created_at
             FROM scholarships ORDER BY opens_at DESC",
        )?;
        let rows = stmt.query_map([], row_to_scholarship)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Scholarships whose application window contains `today` (ISO date).
    pub fn list_open_scholarships(&self, today: &str) -> Result<Vec<Scholarship>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, provider, description, quota, opens_at, closes_at, created_at
             FROM scholarships WHERE opens_at <= ?1 AND closes_at >= ?1 ORDER BY closes_at",
        )?;
        let rows = stmt.query_map(params![today], row_to_scholarship)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    pub fn delete_scholarship(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM scholarships WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(PortalError::NotFound(format!("scholarship {id}")));
        }
        Ok(())
    }

    pub fn count_scholarships(&self) -> Result<u64> {
        let count: u64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM scholarships", [], |row| row.get(0))?;
        Ok(count)
    }

    // ── Activities (kegiatan) ──────────────────────────────────

    pub fn insert_activity(
        &self,
        name: &str,
        description: &str,
        location: &str,
        starts_at: &str,
        ends_at: &str,
    ) -> Result<Activity> {
        let id = Uuid::now_v7().to_string();
        self.conn.execute(
            "INSERT INTO activities (id, name, description, location, starts_at, ends_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![id, name, description, location, starts_at, ends_at],
        )?;
        self.get_activity(&id)
    }

    pub fn get_activity(&self, id: &str) -> Result<Activity> {
        self.conn
            .query_row(
                "SELECT id, name, description, location, starts_at, ends_at, created_at
                 FROM activities WHERE id = ?1",
                params![id],
                row_to_activity,
            )
            .optional()?
            .ok_or_else(|| PortalError::NotFound(format!("activity {id}")))
    }

    /// All activities in agenda order (by start time).
    pub fn list_activities(&self) -> Result<Vec<Activity>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, location, starts_at, ends_at, created_at
             FROM activities ORDER BY starts_at",
        )?;
        let rows = stmt.query_map([], row_to_activity)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Activities that have not ended yet, in agenda order.
    pub fn list_upcoming_activities(&self, now: &str) -> Result<Vec<Activity>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, location, starts_at, ends_at, created_at
             FROM activities WHERE ends_at >= ?1 ORDER BY starts_at",
        )?;
        let rows = stmt.query_map(params![now], row_to_activity)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    pub fn delete_activity(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM activities WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(PortalError::NotFound(format!("activity {id}")));
        }
        Ok(())
    }

    pub fn count_activities(&self) -> Result<u64> {
        let count: u64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM activities", [], |row| row.get(0))?;
        Ok(count)
    }

    // ── Organizations (organisasi) ─────────────────────────────

    pub fn insert_organization(
        &self,
        name: &str,
        abbrev: &str,
        description: &str,
        chairperson: &str,
        period: &str,
    ) -> Result<Organization> {
        let id = Uuid::now_v7().to_string();
        self.conn.execute(
            "INSERT INTO organizations (id, name, abbrev, description, chairperson, period)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![id, name, abbrev, description, chairperson, period],
        )?;
        self.get_organization(&id)
    }

    pub fn get_organization(&self, id: &str) -> Result<Organization> {
        self.conn
            .query_row(
                "SELECT id, name, abbrev, description, chairperson, period, created_at
                 FROM organizations WHERE id = ?1",
                params![id],
                row_to_organization,
            )
            .optional()?
            .ok_or_else(|| PortalError::NotFound(format!("organization {id}")))
    }

    pub fn list_organizations(&self) -> Result<Vec<Organization>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, abbrev, description, chairperson, period, created_at
             FROM organizations ORDER BY name",
        )?;
        let rows = stmt.query_map([], row_to_organization)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    pub fn delete_organization(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM organizations WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(PortalError::NotFound(format!("organization {id}")));
        }
        Ok(())
    }

    // ── News (berita) ──────────────────────────────────────────

    pub fn insert_news(&self, title: &str, body: &str, publish: bool) -> Result<NewsPost> {
        let id = Uuid::now_v7().to_string();
        if publish {
            self.conn.execute(
                "INSERT INTO news (id, title, body, published_at)
                 VALUES (?1, ?2, ?3, datetime('now'))",
                params![id, title, body],
            )?;
        } else {
            self.conn.execute(
                "INSERT INTO news (id, title, body) VALUES (?1, ?2, ?3)",
                params![id, title, body],
            )?;
        }
        self.get_news(&id)
    }

    pub fn get_news(&self, id: &str) -> Result<NewsPost> {
        self.conn
            .query_row(
                "SELECT id, title, body, published_at, created_at FROM news WHERE id = ?1",
                params![id],
                row_to_news,
            )
            .optional()?
            .ok_or_else(|| PortalError::NotFound(format!("news {id}")))
    }

    pub fn list_news(&self) -> Result<Vec<NewsPost>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, body, published_at, created_at
             FROM news ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map([], row_to_news)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    pub fn list_published_news(&self) -> Result<Vec<NewsPost>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, body, published_at, created_at
             FROM news WHERE published_at IS NOT NULL ORDER BY published_at DESC",
        )?;
        let rows = stmt.query_map([], row_to_news)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    pub fn delete_news(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM news WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(PortalError::NotFound(format!("news {id}")));
        }
        Ok(())
    }

    // ── Achievements (prestasi) ────────────────────────────────

    pub fn insert_achievement(
        &self,
        student_name: &str,
        nim: &str,
        title: &str,
        level: AchievementLevel,
        year: i32,
    ) -> Result<Achievement> {
        let id = Uuid::now_v7().to_string();
        self.conn.execute(
            "INSERT INTO achievements (id, student_name, nim, title, level, year)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![id, student_name, nim, title, level.as_str(), year],
        )?;
        self.get_achievement(&id)
    }

    pub fn get_achievement(&self, id: &str) -> Result<Achievement> {
        self.conn
            .query_row(
                "SELECT id, student_name, nim, title, level, year, created_at
                 FROM achievements WHERE id = ?1",
                params![id],
                row_to_achievement,
            )
            .optional()?
            .ok_or_else(|| PortalError::NotFound(format!("achievement {id}")))
    }

    pub fn list_achievements(&self) -> Result<Vec<Achievement>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, student_name, nim, title, level, year, created_at
             FROM achievements ORDER BY year DESC, created_at DESC",
        )?;
        let rows = stmt.query_map([], row_to_achievement)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    pub fn delete_achievement(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM achievements WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(PortalError::NotFound(format!("achievement {id}")));
        }
        Ok(())
    }

    pub fn count_achievements(&self) -> Result<u64> {
        let count: u64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM achievements", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn row_to_announcement(row: &rusqlite::Row<'_>) -> rusqlite::Result<Announcement> {
    Ok(Announcement {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        status: row.get::<_, String>(3)?.parse().unwrap_or_default(),
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn row_to_service_request(row: &rusqlite::Row<'_>) -> rusqlite::Result<ServiceRequest> {
    Ok(ServiceRequest {
        id: row.get(0)?,
        user_id: row.get(1)?,
        subject: row.get(2)?,
        detail: row.get(3)?,
        status: row.get::<_, String>(4)?.parse().unwrap_or_default(),
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn row_to_scholarship(row: &rusqlite::Row<'_>) -> rusqlite::Result<Scholarship> {
    Ok(Scholarship {
        id: row.get(0)?,
        name: row.get(1)?,
        provider: row.get(2)?,
        description: row.get(3)?,
        quota: row.get(4)?,
        opens_at: row.get(5)?,
        closes_at: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn row_to_activity(row: &rusqlite::Row<'_>) -> rusqlite::Result<Activity> {
    Ok(Activity {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        location: row.get(3)?,
        starts_at: row.get(4)?,
        ends_at: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn row_to_organization(row: &rusqlite::Row<'_>) -> rusqlite::Result<Organization> {
    Ok(Organization {
        id: row.get(0)?,
        name: row.get(1)?,
        abbrev: row.get(2)?,
        description: row.get(3)?,
        chairperson: row.get(4)?,
        period: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn row_to_news(row: &rusqlite::Row<'_>) -> rusqlite::Result<NewsPost> {
    Ok(NewsPost {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        published_at: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn row_to_achievement(row: &rusqlite::Row<'_>) -> rusqlite::Result<Achievement> {
    Ok(Achievement {
        id: row.get(0)?,
        student_name: row.get(1)?,
        nim: row.get(2)?,
        title: row.get(3)?,
        level: row.get::<_, String>(4)?.parse().unwrap_or_default(),
        year: row.get(5)?,
        created_at: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announcement_crud() {
        let db = PortalDb::open_in_memory().unwrap();
        let a = db
            .insert_announcement("Libur semester", "Kampus libur.", PublishStatus::Draft)
            .unwrap();
        assert_eq!(a.status, PublishStatus::Draft);

        let updated = db
            .update_announcement(&a.id, "Libur semester", "Kampus libur.", PublishStatus::Published)
            .unwrap();
        assert_eq!(updated.status, PublishStatus::Published);
        assert_eq!(db.list_published_announcements().unwrap().len(), 1);

        db.delete_announcement(&a.id).unwrap();
        assert!(matches!(
            db.get_announcement(&a.id),
            Err(PortalError::NotFound(_))
        ));
    }

    #[test]
    fn service_request_lifecycle() {
        let db = PortalDb::open_in_memory().unwrap();
        let req = db
            .insert_service_request("user-1", "Surat aktif kuliah", "Untuk beasiswa.")
            .unwrap();
        assert_eq!(req.status, ServiceStatus::Pending);
        assert_eq!(db.count_pending_services().unwrap(), 1);

        let done = db.update_service_status(&req.id, ServiceStatus::Done).unwrap();
        assert_eq!(done.status, ServiceStatus::Done);
        assert_eq!(db.count_pending_services().unwrap(), 0);

        assert_eq!(db.list_service_requests_for_user("user-1").unwrap().len(), 1);
        assert!(db.list_service_requests_for_user("user-2").unwrap().is_empty());
    }

    #[test]
    fn activities_come_back_in_agenda_order() {
        let db = PortalDb::open_in_memory().unwrap();
        db.insert_activity("Seminar", "", "Aula", "2026-09-20 09:00", "2026-09-20 12:00")
            .unwrap();
        db.insert_activity("Upacara", "", "Lapangan", "2026-08-17 07:00", "2026-08-17 09:00")
            .unwrap();
        db.insert_activity("Workshop", "", "Lab", "2026-09-01 13:00", "2026-09-01 16:00")
            .unwrap();

        let agenda = db.list_activities().unwrap();
        let names: Vec<_> = agenda.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Upacara", "Workshop", "Seminar"]);

        let upcoming = db.list_upcoming_activities("2026-08-20 00:00").unwrap();
        assert_eq!(upcoming.len(), 2);
    }

    #[test]
    fn open_scholarship_window() {
        let db = PortalDb::open_in_memory().unwrap();
        db.insert_scholarship("KIP Kuliah", "Kemdikbud", "", 100, "2026-01-01", "2026-03-31")
            .unwrap();
        db.insert_scholarship("Djarum", "Djarum Foundation", "", 20, "2026-05-01", "2026-06-30")
            .unwrap();

        let open = db.list_open_scholarships("2026-02-15").unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].name, "KIP Kuliah");
        assert!(db.list_open_scholarships("2026-04-10").unwrap().is_empty());
    }

    #[test]
    fn unpublished_news_is_hidden() {
        let db = PortalDb::open_in_memory().unwrap();
        db.insert_news("Juara lomba", "Tim robotik juara.", true).unwrap();
        db.insert_news("Draft berita", "Belum tayang.", false).unwrap();

        assert_eq!(db.list_news().unwrap().len(), 2);
        let published = db.list_published_news().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].title, "Juara lomba");
    }
}
