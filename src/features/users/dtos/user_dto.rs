use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::{User, UserRole};
use crate::features::users::services::RegisterUser;
use crate::shared::constants::{MAX_EMAIL_LENGTH, MAX_NAME_LENGTH};

/// Request DTO for user registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = MAX_EMAIL_LENGTH, message = "email must be at most 100 characters"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,

    /// Defaults to citizen
    pub role: Option<UserRole>,
}

impl From<RegisterRequestDto> for RegisterUser {
    fn from(dto: RegisterRequestDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            password: dto.password,
            role: dto.role,
        }
    }
}

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Public view of an account (no credential)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            created_at: u.created_at,
        }
    }
}

/// Response DTO for registration
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponseDto {
    pub message: String,
    pub user: UserResponseDto,
}

/// Response DTO for login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponseDto {
    pub user: UserResponseDto,
    /// Session token to send as `Authorization: Bearer <token>`
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiry time in seconds
    pub expires_in: i64,
}
