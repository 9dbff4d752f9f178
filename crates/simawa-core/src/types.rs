use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PortalError;

/// Publication state of an announcement or news post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    #[default]
    Draft,
    Published,
}

impl PublishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Draft => "draft",
            PublishStatus::Published => "published",
        }
    }
}

impl fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PublishStatus {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PublishStatus::Draft),
            "published" => Ok(PublishStatus::Published),
            other => Err(PortalError::InvalidStatus(other.to_string())),
        }
    }
}

/// Lifecycle of a student service request (layanan).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    #[default]
    Pending,
    Processed,
    Done,
    Rejected,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Pending => "pending",
            ServiceStatus::Processed => "processed",
            ServiceStatus::Done => "done",
            ServiceStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServiceStatus {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ServiceStatus::Pending),
            "processed" => Ok(ServiceStatus::Processed),
            "done" => Ok(ServiceStatus::Done),
            "rejected" => Ok(ServiceStatus::Rejected),
            other => Err(PortalError::InvalidStatus(other.to_string())),
        }
    }
}

/// Competition level of a recorded achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementLevel {
    #[default]
    Internal,
    Regional,
    Nasional,
    Internasional,
}

impl AchievementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementLevel::Internal => "internal",
            AchievementLevel::Regional => "regional",
            AchievementLevel::Nasional => "nasional",
            AchievementLevel::Internasional => "internasional",
        }
    }
}

impl fmt::Display for AchievementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AchievementLevel {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal" => Ok(AchievementLevel::Internal),
            "regional" => Ok(AchievementLevel::Regional),
            "nasional" => Ok(AchievementLevel::Nasional),
            "internasional" => Ok(AchievementLevel::Internasional),
            other => Err(PortalError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub body: String,
    pub status: PublishStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: String,
    pub user_id: String,
    pub subject: String,
    pub detail: String,
    pub status: ServiceStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scholarship {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub description: String,
    pub quota: u32,
    /// Application window, ISO dates (YYYY-MM-DD).
    pub opens_at: String,
    pub closes_at: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub description: String,
    pub location: String,
    /// Schedule, ISO datetimes (YYYY-MM-DD HH:MM).
    pub starts_at: String,
    pub ends_at: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub abbrev: String,
    pub description: String,
    pub chairperson: String,
    /// Stewardship period, e.g. "2025/2026".
    pub period: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsPost {
    pub id: String,
    pub title: String,
    pub body: String,
    pub published_at: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub student_name: String,
    pub nim: String,
    pub title: String,
    pub level: AchievementLevel,
    pub year: i32,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip() {
        for s in [
            ServiceStatus::Pending,
            ServiceStatus::Processed,
            ServiceStatus::Done,
            ServiceStatus::Rejected,
        ] {
            assert_eq!(s.as_str().parse::<ServiceStatus>().unwrap(), s);
        }
    }

    #[test]
    fn unknown_status_is_error() {
        assert!("bogus".parse::<PublishStatus>().is_err());
        assert!("bogus".parse::<AchievementLevel>().is_err());
    }
}
