use std::sync::Arc;

use axum::{
    extract::{multipart::Field, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{
    ReportResponseDto, SubmitReportDto, SubmitReportResponseDto,
};
use crate::features::reports::services::{ReportImage, ReportService, SubmitReport};
use crate::shared::constants::IMAGE_FIELD;
use crate::shared::types::{ErrorResponse, MessageResponse};
use crate::shared::validation::is_blank;

/// Submit a new report
///
/// Accepts multipart/form-data with `title`, `description`, `location`,
/// `user_id` and an optional `image` file. The category is assigned by the
/// keyword classifier. When a session token is sent, its user owns the report.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body(
        content = SubmitReportDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 201, description = "Report submitted and classified", body = SubmitReportResponseDto),
        (status = 400, description = "Missing title/description or invalid file", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn submit_report(
    session: Option<AuthenticatedUser>,
    State(service): State<Arc<ReportService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<SubmitReportResponseDto>)> {
    let mut form = SubmitReport::default();
    let mut form_user_id: Option<Uuid> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "title" => form.title = read_text(field).await?,
            "description" => form.description = read_text(field).await?,
            "location" => form.location = Some(read_text(field).await?),
            "user_id" => form_user_id = parse_user_id(&read_text(field).await?)?,
            IMAGE_FIELD => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field.file_name().map(|s| s.to_string()).unwrap_or_default();

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                // Browsers send an empty part when no file was picked
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }

                form.image = Some(ReportImage {
                    field_name: IMAGE_FIELD.to_string(),
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    form.user_id = session.map(|user| user.user_id).or(form_user_id);

    let submission = service.submit(form).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitReportResponseDto {
            message: submission.message,
            report: submission.report.into(),
        }),
    ))
}

/// List all reports, newest first
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "All reports", body = Vec<ReportResponseDto>),
        (status = 500, description = "Server error", body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    let reports = service.list().await?;
    Ok(Json(reports.into_iter().map(|r| r.into()).collect()))
}

/// Delete a report
///
/// Succeeds even when no report has the given id.
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report deleted", body = MessageResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn delete_report(
    session: Option<AuthenticatedUser>,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>> {
    if let Some(user) = &session {
        debug!(
            "Report {} delete requested by {} (admin: {})",
            id,
            user.user_id,
            user.is_admin()
        );
    }

    service.remove(id).await?;

    Ok(Json(MessageResponse::new("Report deleted successfully")))
}

async fn read_text(field: Field<'_>) -> Result<String> {
    let name = field.name().unwrap_or("").to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))
}

fn parse_user_id(value: &str) -> Result<Option<Uuid>> {
    if is_blank(value) {
        return Ok(None);
    }

    Uuid::parse_str(value.trim())
        .map(Some)
        .map_err(|_| AppError::Validation("user_id must be a valid UUID".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::multipart::{MultipartForm, Part};
    use serde_json::Value;

    use crate::shared::test_helpers::TestContext;

    fn form(title: &str, description: &str) -> MultipartForm {
        MultipartForm::new()
            .add_text("title", title)
            .add_text("description", description)
            .add_text("location", "X")
    }

    #[tokio::test]
    async fn test_submit_report_returns_created_with_category() {
        let ctx = TestContext::new();

        let response = ctx
            .server
            .post("/api/reports")
            .multipart(form("Streetlight out", "broken street light on 5th"))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["message"], "Report submitted! Classified as: GOVERNMENT");
        assert_eq!(body["report"]["category"], "government");
        assert_eq!(body["report"]["status"], "open");
        assert_eq!(body["report"]["location"], "X");
        assert!(body["report"]["image_url"].is_null());
    }

    #[tokio::test]
    async fn test_submit_report_with_image() {
        let ctx = TestContext::new();
        let image = Part::bytes(vec![0x89, 0x50, 0x4E, 0x47])
            .file_name("photo.png")
            .mime_type("image/png");

        let response = ctx
            .server
            .post("/api/reports")
            .multipart(form("Need help", "looking for a plumber to fix sink").add_part("image", image))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["report"]["category"], "service");

        let image_url = body["report"]["image_url"].as_str().unwrap();
        assert!(image_url.starts_with("/uploads/image-"));
        assert!(image_url.ends_with(".png"));
        assert_eq!(ctx.file_storage.stored_paths(), vec![image_url.to_string()]);
    }

    #[tokio::test]
    async fn test_submit_report_missing_title_is_bad_request() {
        let ctx = TestContext::new();

        let response = ctx
            .server
            .post("/api/reports")
            .multipart(MultipartForm::new().add_text("description", "pothole"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "title is required");
    }

    #[tokio::test]
    async fn test_submit_report_invalid_user_id() {
        let ctx = TestContext::new();

        let response = ctx
            .server
            .post("/api/reports")
            .multipart(form("Pothole", "road").add_text("user_id", "42"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_report_uses_form_user_id() {
        let ctx = TestContext::new();
        let user_id = Uuid::new_v4();

        let response = ctx
            .server
            .post("/api/reports")
            .multipart(form("Pothole", "road").add_text("user_id", user_id.to_string()))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["report"]["user_id"], user_id.to_string());
    }

    #[tokio::test]
    async fn test_session_user_owns_report() {
        let ctx = TestContext::new();
        let (user_id, token) = ctx.register_and_login("owner@example.com", "secret-pass").await;

        let response = ctx
            .server
            .post("/api/reports")
            .add_header(
                axum::http::header::AUTHORIZATION,
                axum::http::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
            )
            .multipart(form("Pothole", "road").add_text("user_id", Uuid::new_v4().to_string()))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["report"]["user_id"], user_id);
    }

    #[tokio::test]
    async fn test_invalid_session_token_is_unauthorized() {
        let ctx = TestContext::new();

        let response = ctx
            .server
            .post("/api/reports")
            .add_header(
                axum::http::header::AUTHORIZATION,
                axum::http::HeaderValue::from_static("Bearer not-a-token"),
            )
            .multipart(form("Pothole", "road"))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(ctx.report_store.is_empty());
    }

    #[tokio::test]
    async fn test_list_reports_newest_first() {
        let ctx = TestContext::new();

        ctx.server
            .post("/api/reports")
            .multipart(form("General note", "just checking in"))
            .await
            .assert_status(StatusCode::CREATED);
        ctx.server
            .post("/api/reports")
            .multipart(form("Need help", "looking for a plumber to fix sink"))
            .await
            .assert_status(StatusCode::CREATED);

        let response = ctx.server.get("/api/reports").await;
        response.assert_status_ok();

        let body: Vec<Value> = response.json();
        assert_eq!(body.len(), 2);
        assert_eq!(body[0]["title"], "Need help");
        assert_eq!(body[1]["title"], "General note");
    }

    #[tokio::test]
    async fn test_list_reports_empty() {
        let ctx = TestContext::new();

        let response = ctx.server.get("/api/reports").await;
        response.assert_status_ok();
        let body: Vec<Value> = response.json();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_delete_report_removes_it_from_list() {
        let ctx = TestContext::new();

        let created: Value = ctx
            .server
            .post("/api/reports")
            .multipart(form("Pothole", "road"))
            .await
            .json();
        let id = created["report"]["id"].as_str().unwrap().to_string();

        let response = ctx.server.delete(&format!("/api/reports/{}", id)).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Report deleted successfully");

        let reports: Vec<Value> = ctx.server.get("/api/reports").await.json();
        assert!(reports.iter().all(|r| r["id"] != id.as_str()));
    }

    #[tokio::test]
    async fn test_delete_unknown_report_succeeds() {
        let ctx = TestContext::new();

        let response = ctx
            .server
            .delete(&format!("/api/reports/{}", Uuid::new_v4()))
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_storage_failure_is_server_error() {
        let ctx = TestContext::with_failing_reports();

        let response = ctx
            .server
            .post("/api/reports")
            .multipart(form("Pothole", "road"))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["message"], "Server Error");

        ctx.server
            .get("/api/reports")
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        ctx.server
            .delete(&format!("/api/reports/{}", Uuid::new_v4()))
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_failed_submission_leaves_no_upload_behind() {
        let ctx = TestContext::with_failing_reports();
        let image = Part::bytes(vec![0x89, 0x50, 0x4E, 0x47])
            .file_name("photo.png")
            .mime_type("image/png");

        let response = ctx
            .server
            .post("/api/reports")
            .multipart(form("Pothole", "road").add_part("image", image))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(ctx.file_storage.stored_paths().is_empty());
    }
}
