use std::sync::Arc;

use axum::{middleware::from_fn_with_state, Router};

use crate::core::middleware;
use crate::features::auth::TokenService;
use crate::features::health::routes as health_routes;
use crate::features::reports::{routes as reports_routes, ReportService};
use crate::features::users::{routes as users_routes, AccountService, UsersState};

/// Services shared by the HTTP routes
#[derive(Clone)]
pub struct AppServices {
    pub report_service: Arc<ReportService>,
    pub account_service: Arc<AccountService>,
    pub token_service: Arc<TokenService>,
}

/// Build the API router
///
/// Report routes and `/api/users/me` see the session behind an optional
/// bearer token. Registration, login and health routes never look at it.
pub fn api_router(services: &AppServices) -> Router {
    let users_state = UsersState {
        account_service: Arc::clone(&services.account_service),
        token_service: Arc::clone(&services.token_service),
    };

    let session_routes = Router::new()
        .merge(reports_routes::routes(Arc::clone(&services.report_service)))
        .merge(users_routes::session_routes(users_state.clone()))
        .route_layer(from_fn_with_state(
            Arc::clone(&services.token_service),
            middleware::session_middleware,
        ));

    Router::new()
        .merge(session_routes)
        .merge(users_routes::public_routes(users_state))
        .merge(health_routes::routes())
}
