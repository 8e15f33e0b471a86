use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use super::model::{AuthenticatedUser, SessionClaims};
use crate::core::config::AuthTokenConfig;
use crate::core::error::{AppError, Result};
use crate::features::users::models::User;

/// Allowed clock skew when checking `exp`
const LEEWAY_SECS: u64 = 30;

/// A freshly signed session token
#[derive(Debug)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Issues and validates HS256 session tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    expires_in: i64,
}

impl TokenService {
    pub fn new(config: &AuthTokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            expires_in: config.expiry.as_secs() as i64,
        }
    }

    /// Sign a token for the given user
    pub fn issue(&self, user: &User) -> Result<IssuedToken> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            iss: self.issuer.clone(),
            iat: now,
            exp: now + self.expires_in,
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))?;

        Ok(IssuedToken {
            access_token,
            expires_in: self.expires_in,
        })
    }

    /// Validate a token and turn it into a session context
    pub fn validate(&self, token: &str) -> Result<AuthenticatedUser> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.leeway = LEEWAY_SECS;

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("Rejected session token: {}", e);
                AppError::Unauthorized("Invalid or expired token".to_string())
            })?
            .claims;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;

        Ok(AuthenticatedUser {
            user_id,
            email: claims.email,
            role: claims.role,
        })
    }
}
