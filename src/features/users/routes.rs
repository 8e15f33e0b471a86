use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::auth::TokenService;
use crate::features::users::handlers::user_handler;
use crate::features::users::services::AccountService;

/// Shared state for the account endpoints
#[derive(Clone)]
pub struct UsersState {
    pub account_service: Arc<AccountService>,
    pub token_service: Arc<TokenService>,
}

/// Registration and login
///
/// These never look at the Authorization header, so a stale token does not
/// stop a client from logging in again.
pub fn public_routes(state: UsersState) -> Router {
    Router::new()
        .route("/api/users/register", post(user_handler::register))
        .route("/api/users/login", post(user_handler::login))
        .with_state(state)
}

/// Routes that read the session
pub fn session_routes(state: UsersState) -> Router {
    Router::new()
        .route("/api/users/me", get(user_handler::get_me))
        .with_state(state)
}
