use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::reports::models::{Report, ReportCategory};

/// Response DTO for report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub category: ReportCategory,
    pub status: String,
    pub user_id: Option<Uuid>,
    /// Path or URL of the attached image
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            location: r.location,
            category: r.category,
            status: r.status,
            user_id: r.user_id,
            image_url: r.image_url,
            created_at: r.created_at,
        }
    }
}

/// Response DTO for a submitted report
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitReportResponseDto {
    /// Classification summary, e.g. "Report submitted! Classified as: GOVERNMENT"
    pub message: String,
    pub report: ReportResponseDto,
}

/// Submit report form for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct SubmitReportDto {
    #[schema(example = "Streetlight out")]
    pub title: String,
    #[schema(example = "broken street light on 5th")]
    pub description: String,
    #[schema(example = "5th Avenue")]
    pub location: Option<String>,
    /// Owner of the report; ignored when a session token is sent
    pub user_id: Option<Uuid>,
    /// Optional photo (jpeg, png, gif or webp)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: Option<String>,
}
