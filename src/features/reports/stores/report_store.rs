use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{is_violation, FOREIGN_KEY_VIOLATION};
use crate::core::error::{AppError, Result};
use crate::features::reports::models::{CreateReport, Report};
use crate::shared::constants::DEFAULT_REPORT_STATUS;

/// Persistent collection of reports
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Insert a report, returning the stored row
    async fn insert(&self, data: CreateReport) -> Result<Report>;

    /// All reports, newest first
    async fn list_newest_first(&self) -> Result<Vec<Report>>;

    /// Delete by id. Returns false when no row had that id.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Postgres-backed report store
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn insert(&self, data: CreateReport) -> Result<Report> {
        sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (title, description, location, user_id, category, image_url, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, location, category, status, user_id, image_url, created_at
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.location)
        .bind(data.user_id)
        .bind(data.category)
        .bind(&data.image_url)
        .bind(DEFAULT_REPORT_STATUS)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_violation(&e, FOREIGN_KEY_VIOLATION) {
                return AppError::Validation(
                    "user_id does not reference an existing user".to_string(),
                );
            }
            tracing::error!("Failed to create report: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_newest_first(&self) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, title, description, location, category, status, user_id, image_url, created_at
            FROM reports
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete report {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
