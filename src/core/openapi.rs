use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::health::handlers as health_handlers;
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers, models as users_models};
use crate::shared::types::{ErrorResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health_handlers::api_test,
        // Users
        users_handlers::user_handler::register,
        users_handlers::user_handler::login,
        users_handlers::user_handler::get_me,
        // Reports
        reports_handlers::report_handler::submit_report,
        reports_handlers::report_handler::list_reports,
        reports_handlers::report_handler::delete_report,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            MessageResponse,
            health_handlers::HealthResponseDto,
            // Auth
            auth::model::AuthenticatedUser,
            // Users
            users_models::UserRole,
            users_dtos::RegisterRequestDto,
            users_dtos::RegisterResponseDto,
            users_dtos::LoginRequestDto,
            users_dtos::LoginResponseDto,
            users_dtos::UserResponseDto,
            // Reports
            reports_models::ReportCategory,
            reports_dtos::SubmitReportDto,
            reports_dtos::SubmitReportResponseDto,
            reports_dtos::ReportResponseDto,
        )
    ),
    tags(
        (name = "health", description = "Liveness checks"),
        (name = "users", description = "Account registration and login"),
        (name = "reports", description = "Civic issue reports"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "CivicConnect API",
        version = "0.1.0",
        description = "API documentation for CivicConnect",
    )
)]
pub struct ApiDoc;

/// Adds the bearer session token scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
