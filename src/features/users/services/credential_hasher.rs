use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use tokio::task;

use crate::core::config::SecurityConfig;
use crate::core::error::{AppError, Result};

/// Salted one-way hashing of account passwords (Argon2id)
///
/// Hashing and verification are CPU-heavy and run on the blocking pool.
#[derive(Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    pub fn new(config: &SecurityConfig) -> Result<Self> {
        let params = Params::new(
            config.argon2_memory_cost_kib,
            config.argon2_time_cost,
            config.argon2_parallelism,
            None, // output length (use default)
        )
        .map_err(|e| AppError::Internal(format!("Invalid Argon2 params: {}", e)))?;

        Ok(Self { params })
    }

    fn argon2(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }

    /// Hash a password into a PHC string
    pub async fn hash(&self, password: &str) -> Result<String> {
        let params = self.params.clone();
        let password = password.to_string();

        task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Self::argon2(params)
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
        })
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task panicked: {}", e)))?
    }

    /// Check a password against a stored PHC string
    ///
    /// The parameters embedded in the stored hash are used, so hashes made
    /// with older work factors still verify.
    pub async fn verify(&self, password: &str, password_hash: &str) -> Result<bool> {
        let params = self.params.clone();
        let password = password.to_string();
        let password_hash = password_hash.to_string();

        task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| AppError::Internal(format!("Invalid password hash format: {}", e)))?;

            Ok(Self::argon2(params)
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok())
        })
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task panicked: {}", e)))?
    }
}
