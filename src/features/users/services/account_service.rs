use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::models::{CreateUser, User, UserRole};
use crate::features::users::services::CredentialHasher;
use crate::features::users::stores::UserStore;

/// Input for a registration
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
}

/// Service for account registration and authentication
pub struct AccountService {
    store: Arc<dyn UserStore>,
    hasher: CredentialHasher,
}

impl AccountService {
    pub fn new(store: Arc<dyn UserStore>, hasher: CredentialHasher) -> Self {
        Self { store, hasher }
    }

    /// Register a new account
    ///
    /// Fails with `DuplicateEmail` if the email is already registered.
    pub async fn register(&self, data: RegisterUser) -> Result<User> {
        if self.store.find_by_email(&data.email).await?.is_some() {
            return Err(AppError::DuplicateEmail(data.email));
        }

        let password_hash = self.hasher.hash(&data.password).await?;

        let user = self
            .store
            .insert(CreateUser {
                name: data.name,
                email: data.email,
                password_hash,
                role: data.role.unwrap_or_default(),
            })
            .await?;

        tracing::info!("Registered user: {} (role: {})", user.id, user.role);
        Ok(user)
    }

    /// Verify email and password
    ///
    /// Unknown email and wrong password fail the same way.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash).await? {
            tracing::debug!("Password mismatch for user: {}", user.id);
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!("User logged in: {}", user.id);
        Ok(user)
    }

    /// Get an account by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{test_security_config, InMemoryUserStore};
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn service() -> AccountService {
        AccountService::new(
            Arc::new(InMemoryUserStore::default()),
            CredentialHasher::new(&test_security_config()).unwrap(),
        )
    }

    fn registration(email: &str, password: &str) -> RegisterUser {
        RegisterUser {
            name: Name().fake(),
            email: email.to_string(),
            password: password.to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn test_register_defaults_to_citizen_and_hashes_password() {
        let service = service();
        let email: String = SafeEmail().fake();

        let user = service
            .register(registration(&email, "hunter22"))
            .await
            .unwrap();

        assert_eq!(user.email, email);
        assert_eq!(user.role, UserRole::Citizen);
        assert_ne!(user.password_hash, "hunter22");
    }

    #[tokio::test]
    async fn test_register_keeps_requested_role() {
        let service = service();
        let mut data = registration("admin@example.com", "hunter22");
        data.role = Some(UserRole::Admin);

        let user = service.register(data).await.unwrap();
        assert_eq!(user.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let service = service();

        service
            .register(registration("same@example.com", "first-pass"))
            .await
            .unwrap();
        let second = service
            .register(registration("same@example.com", "second-pass"))
            .await;

        assert!(matches!(second, Err(AppError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let service = service();
        let registered = service
            .register(registration("citizen@example.com", "right-pass"))
            .await
            .unwrap();

        let user = service
            .authenticate("citizen@example.com", "right-pass")
            .await
            .unwrap();
        assert_eq!(user.id, registered.id);

        let wrong = service
            .authenticate("citizen@example.com", "wrong-pass")
            .await;
        assert!(matches!(wrong, Err(AppError::InvalidCredentials)));

        let unknown = service
            .authenticate("nobody@example.com", "right-pass")
            .await;
        assert!(matches!(unknown, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_get_by_id_unknown_is_not_found() {
        let service = service();

        let result = service.get_by_id(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
