use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Report category enum matching database enum
///
/// Always derived by the classifier, never taken from the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportCategory {
    /// Public infrastructure issue for the government
    Government,
    /// Job for a private service provider
    Service,
    /// Nothing matched, waiting for manual triage
    Pending,
}

impl ReportCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportCategory::Government => "government",
            ReportCategory::Service => "service",
            ReportCategory::Pending => "pending",
        }
    }
}

impl std::fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database model for report
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub category: ReportCategory,
    pub status: String,
    pub user_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new report
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub category: ReportCategory,
    pub user_id: Option<Uuid>,
    pub image_url: Option<String>,
}
