use serde::{Deserialize, Serialize};

use simawa_auth::menu::MenuItem;
use simawa_core::types::{
    AchievementLevel, Announcement, PublishStatus, Scholarship, ServiceStatus,
};

#[derive(Serialize)]
pub struct IdentityResponse {
    pub id: String,
    pub username: String,
    pub name: String,
    pub role: String,
    pub role_label: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    /// Path of the role's canonical dashboard, for the SPA to navigate to.
    pub dashboard: String,
    pub expires_in: u64,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub identity: IdentityResponse,
    pub menu: Vec<MenuItem>,
}

#[derive(Serialize)]
pub struct AdminStats {
    pub announcements: u64,
    pub activities: u64,
    pub scholarships: u64,
    pub pending_services: u64,
    pub achievements: u64,
}

#[derive(Serialize)]
pub struct AdminDashboardResponse {
    pub identity: IdentityResponse,
    pub menu: Vec<MenuItem>,
    pub stats: AdminStats,
    /// Only filled for superadmin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_users: Option<u64>,
}

#[derive(Serialize)]
pub struct StudentDashboardResponse {
    pub identity: IdentityResponse,
    pub menu: Vec<MenuItem>,
    pub announcements: Vec<Announcement>,
    pub open_scholarships: Vec<Scholarship>,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub name: String,
    pub role: String,
    pub role_label: String,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub status: PublishStatus,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAnnouncementRequest {
    pub title: String,
    pub body: String,
    pub status: PublishStatus,
}

#[derive(Debug, Deserialize)]
pub struct CreateServiceRequest {
    pub subject: String,
    pub detail: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateServiceStatusRequest {
    pub status: ServiceStatus,
}

#[derive(Debug, Deserialize)]
pub struct CreateScholarshipRequest {
    pub name: String,
    pub provider: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quota: u32,
    pub opens_at: String,
    pub closes_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub starts_at: String,
    pub ends_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrganizationRequest {
    pub name: String,
    pub abbrev: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub chairperson: String,
    #[serde(default)]
    pub period: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateNewsRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub publish: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateAchievementRequest {
    pub student_name: String,
    pub nim: String,
    pub title: String,
    #[serde(default)]
    pub level: AchievementLevel,
    pub year: i32,
}
