use axum::{routing::get, Router};

use crate::features::health::handlers;

/// Liveness routes (no state, no session)
pub fn routes() -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/test", get(handlers::api_test))
}
