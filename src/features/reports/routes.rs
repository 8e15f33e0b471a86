use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, post},
    Router,
};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;
use crate::shared::constants::MAX_IMAGE_SIZE;

/// Create routes for the reports feature
///
/// Note: These routes are public; a session token is optional
pub fn routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/api/reports",
            // Allow body size up to MAX_IMAGE_SIZE + buffer for multipart overhead
            post(handlers::submit_report)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + 1024 * 1024))
                .get(handlers::list_reports),
        )
        .route("/api/reports/{id}", delete(handlers::delete_report))
        .with_state(service)
}
