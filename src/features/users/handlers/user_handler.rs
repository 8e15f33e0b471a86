use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{
    LoginRequestDto, LoginResponseDto, RegisterRequestDto, RegisterResponseDto, UserResponseDto,
};
use crate::features::users::routes::UsersState;
use crate::shared::types::ErrorResponse;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponseDto),
        (status = 400, description = "Validation error or email already registered", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn register(
    State(state): State<UsersState>,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<RegisterResponseDto>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = state.account_service.register(dto.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponseDto {
            message: "User registered successfully!".to_string(),
            user: user.into(),
        }),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponseDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn login(
    State(state): State<UsersState>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<LoginResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = state
        .account_service
        .authenticate(&dto.email, &dto.password)
        .await?;
    let token = state.token_service.issue(&user)?;

    Ok(Json(LoginResponseDto {
        user: user.into(),
        access_token: token.access_token,
        token_type: "Bearer".to_string(),
        expires_in: token.expires_in,
    }))
}

/// Get the account behind the session token
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponseDto),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse)
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    session: AuthenticatedUser,
    State(state): State<UsersState>,
) -> Result<Json<UserResponseDto>> {
    let user = state.account_service.get_by_id(session.user_id).await?;
    Ok(Json(user.into()))
}
