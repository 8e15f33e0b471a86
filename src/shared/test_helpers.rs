//! In-memory stores and an HTTP harness for tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::core::app::{api_router, AppServices};
use crate::core::config::{AuthTokenConfig, SecurityConfig};
use crate::core::error::{AppError, Result};
use crate::features::auth::TokenService;
use crate::features::reports::models::{CreateReport, Report};
use crate::features::reports::stores::ReportStore;
use crate::features::reports::ReportService;
use crate::features::users::models::{CreateUser, User};
use crate::features::users::stores::UserStore;
use crate::features::users::{AccountService, CredentialHasher};
use crate::modules::storage::FileStorage;
use crate::shared::constants::DEFAULT_REPORT_STATUS;

/// Cheap Argon2 work factors so tests stay fast
pub fn test_security_config() -> SecurityConfig {
    SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    }
}

pub fn test_token_config() -> AuthTokenConfig {
    AuthTokenConfig {
        secret: "test-secret".to_string(),
        issuer: "civicconnect".to_string(),
        expiry: Duration::from_secs(3600),
    }
}

#[derive(Default)]
pub struct InMemoryReportStore {
    reports: Mutex<Vec<Report>>,
}

impl InMemoryReportStore {
    pub fn is_empty(&self) -> bool {
        self.reports.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn insert(&self, data: CreateReport) -> Result<Report> {
        let report = Report {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            location: data.location,
            category: data.category,
            status: DEFAULT_REPORT_STATUS.to_string(),
            user_id: data.user_id,
            image_url: data.image_url,
            created_at: Utc::now(),
        };
        self.reports.lock().unwrap().push(report.clone());
        Ok(report)
    }

    async fn list_newest_first(&self) -> Result<Vec<Report>> {
        // Reports created within the same tick keep insertion order reversed
        let mut reports: Vec<Report> = self.reports.lock().unwrap().iter().rev().cloned().collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut reports = self.reports.lock().unwrap();
        let before = reports.len();
        reports.retain(|r| r.id != id);
        Ok(reports.len() != before)
    }
}

/// Report store whose backing database is down
pub struct FailingReportStore;

#[async_trait]
impl ReportStore for FailingReportStore {
    async fn insert(&self, _data: CreateReport) -> Result<Report> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn list_newest_first(&self) -> Result<Vec<Report>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: Uuid) -> Result<bool> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, data: CreateUser) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == data.email) {
            return Err(AppError::DuplicateEmail(data.email));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            role: data.role,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

/// Keeps uploaded files in memory and serves them under `/uploads`
#[derive(Default)]
pub struct InMemoryFileStorage {
    files: Mutex<Vec<(String, Vec<u8>)>>,
    attempts: Mutex<Vec<String>>,
    /// Number of upcoming `store` calls to answer with "name taken"
    taken: Mutex<usize>,
}

impl InMemoryFileStorage {
    /// Storage whose first `count` names are already in use
    pub fn with_taken_names(count: usize) -> Self {
        Self {
            taken: Mutex::new(count),
            ..Self::default()
        }
    }

    pub fn stored_paths(&self) -> Vec<String> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Every file name `store` was called with, in order
    pub fn attempted_names(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn store(
        &self,
        file_name: &str,
        _content_type: &str,
        data: &[u8],
    ) -> Result<Option<String>> {
        self.attempts.lock().unwrap().push(file_name.to_string());

        let mut taken = self.taken.lock().unwrap();
        if *taken > 0 {
            *taken -= 1;
            return Ok(None);
        }

        let path = format!("/uploads/{}", file_name);
        let mut files = self.files.lock().unwrap();
        if files.iter().any(|(existing, _)| *existing == path) {
            return Ok(None);
        }
        files.push((path.clone(), data.to_vec()));
        Ok(Some(path))
    }

    async fn remove(&self, file_name: &str) -> Result<()> {
        let path = format!("/uploads/{}", file_name);
        self.files.lock().unwrap().retain(|(existing, _)| *existing != path);
        Ok(())
    }
}

/// Full API router over in-memory stores
pub struct TestContext {
    pub server: TestServer,
    pub report_store: Arc<InMemoryReportStore>,
    pub file_storage: Arc<InMemoryFileStorage>,
}

impl TestContext {
    pub fn new() -> Self {
        let report_store = Arc::new(InMemoryReportStore::default());
        Self::build(
            Arc::clone(&report_store) as Arc<dyn ReportStore>,
            report_store,
        )
    }

    /// Context whose report database always errors
    pub fn with_failing_reports() -> Self {
        Self::build(
            Arc::new(FailingReportStore),
            Arc::new(InMemoryReportStore::default()),
        )
    }

    fn build(reports: Arc<dyn ReportStore>, report_store: Arc<InMemoryReportStore>) -> Self {
        let file_storage = Arc::new(InMemoryFileStorage::default());

        let hasher = CredentialHasher::new(&test_security_config())
            .expect("test argon2 params are valid");
        let services = AppServices {
            report_service: Arc::new(ReportService::new(
                reports,
                Arc::clone(&file_storage) as Arc<dyn FileStorage>,
            )),
            account_service: Arc::new(AccountService::new(
                Arc::new(InMemoryUserStore::default()),
                hasher,
            )),
            token_service: Arc::new(TokenService::new(&test_token_config())),
        };

        let server = TestServer::new(api_router(&services)).expect("test server starts");

        Self {
            server,
            report_store,
            file_storage,
        }
    }

    /// Register an account and log in, returning `(user_id, access_token)`
    pub async fn register_and_login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .server
            .post("/api/users/register")
            .json(&json!({ "name": "Test User", "email": email, "password": password }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let response = self
            .server
            .post("/api/users/login")
            .json(&json!({ "email": email, "password": password }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let user_id = body["user"]["id"].as_str().unwrap_or_default().to_string();
        let token = body["access_token"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        (user_id, token)
    }
}
