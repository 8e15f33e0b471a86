use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of the API liveness probe
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponseDto {
    pub message: String,
    pub status: String,
}

/// Check that the API layer is up
#[utoipa::path(
    get,
    path = "/api/test",
    responses(
        (status = 200, description = "API is reachable", body = HealthResponseDto)
    ),
    tag = "health"
)]
pub async fn api_test() -> Json<HealthResponseDto> {
    Json(HealthResponseDto {
        message: "Test Controller is working!".to_string(),
        status: "Success".to_string(),
    })
}

/// Process liveness check for load balancers
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
