use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::classifier::{classification_text, classify};
use crate::features::reports::models::{CreateReport, Report, ReportCategory};
use crate::features::reports::stores::ReportStore;
use crate::modules::storage::{generate_file_name, FileStorage};
use crate::shared::constants::{
    ALLOWED_IMAGE_TYPES, MAX_IMAGE_SIZE, MAX_LOCATION_LENGTH, MAX_TITLE_LENGTH,
};
use crate::shared::validation::is_blank;

/// Image that accompanied a submission
#[derive(Debug, Clone)]
pub struct ReportImage {
    /// Multipart field the file arrived in
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Input for a report submission
#[derive(Debug, Clone, Default)]
pub struct SubmitReport {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub user_id: Option<Uuid>,
    pub image: Option<ReportImage>,
}

/// Upload that made it into storage
struct StoredImage {
    file_name: String,
    url: String,
}

/// How many later timestamps to try when an upload name is taken
const MAX_FILE_NAME_ATTEMPTS: i64 = 16;

/// Stored report plus the classification summary shown to the citizen
#[derive(Debug)]
pub struct ReportSubmission {
    pub report: Report,
    pub message: String,
}

/// Service for report operations
pub struct ReportService {
    store: Arc<dyn ReportStore>,
    storage: Arc<dyn FileStorage>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>, storage: Arc<dyn FileStorage>) -> Self {
        Self { store, storage }
    }

    /// Classify, store the optional image, and persist a new report
    pub async fn submit(&self, data: SubmitReport) -> Result<ReportSubmission> {
        Self::validate(&data)?;

        let category = classify(&classification_text(&data.title, &data.description));

        let image = match data.image {
            Some(image) => Some(self.store_image(image).await?),
            None => None,
        };

        let inserted = self
            .store
            .insert(CreateReport {
                title: data.title,
                description: data.description,
                location: data.location.filter(|l| !is_blank(l)),
                category,
                user_id: data.user_id,
                image_url: image.as_ref().map(|i| i.url.clone()),
            })
            .await;

        let report = match inserted {
            Ok(report) => report,
            Err(e) => {
                // No report will reference the upload
                if let Some(image) = &image {
                    self.discard_image(image).await;
                }
                return Err(e);
            }
        };

        tracing::info!(
            "Created report: {} (category: {}, owner: {:?}, image: {})",
            report.id,
            report.category,
            report.user_id,
            report.image_url.is_some()
        );

        Ok(ReportSubmission {
            message: submission_message(report.category),
            report,
        })
    }

    /// All reports, newest first
    pub async fn list(&self) -> Result<Vec<Report>> {
        self.store.list_newest_first().await
    }

    /// Delete a report by id
    ///
    /// Deleting an id that does not exist is not an error. The return value
    /// tells whether a row was actually removed.
    pub async fn remove(&self, id: Uuid) -> Result<bool> {
        let removed = self.store.delete(id).await?;

        if removed {
            tracing::info!("Deleted report: {}", id);
        } else {
            tracing::debug!("Delete requested for unknown report: {}", id);
        }

        Ok(removed)
    }

    fn validate(data: &SubmitReport) -> Result<()> {
        if is_blank(&data.title) {
            return Err(AppError::Validation("title is required".to_string()));
        }
        if is_blank(&data.description) {
            return Err(AppError::Validation("description is required".to_string()));
        }
        if data.title.chars().count() > MAX_TITLE_LENGTH {
            return Err(AppError::Validation(format!(
                "title must be at most {} characters",
                MAX_TITLE_LENGTH
            )));
        }
        if let Some(location) = &data.location {
            if location.chars().count() > MAX_LOCATION_LENGTH {
                return Err(AppError::Validation(format!(
                    "location must be at most {} characters",
                    MAX_LOCATION_LENGTH
                )));
            }
        }
        if let Some(image) = &data.image {
            if !ALLOWED_IMAGE_TYPES.contains(&image.content_type.as_str()) {
                return Err(AppError::Validation(format!(
                    "File type '{}' is not allowed. Allowed types: {}",
                    image.content_type,
                    ALLOWED_IMAGE_TYPES.join(", ")
                )));
            }
            if image.data.len() > MAX_IMAGE_SIZE {
                return Err(AppError::Validation(format!(
                    "File too large. Maximum size is {} MB",
                    MAX_IMAGE_SIZE / 1024 / 1024
                )));
            }
        }
        Ok(())
    }

    /// Store the upload under a fresh name
    ///
    /// When the name for this millisecond is taken the timestamp is bumped,
    /// so concurrent uploads never replace each other.
    async fn store_image(&self, image: ReportImage) -> Result<StoredImage> {
        let timestamp = Utc::now().timestamp_millis();

        for offset in 0..MAX_FILE_NAME_ATTEMPTS {
            let file_name =
                generate_file_name(&image.field_name, &image.file_name, timestamp + offset);

            if let Some(url) = self
                .storage
                .store(&file_name, &image.content_type, &image.data)
                .await?
            {
                return Ok(StoredImage { file_name, url });
            }
        }

        Err(AppError::Storage(format!(
            "No free file name for upload '{}' after {} attempts",
            image.file_name, MAX_FILE_NAME_ATTEMPTS
        )))
    }

    async fn discard_image(&self, image: &StoredImage) {
        match self.storage.remove(&image.file_name).await {
            Ok(()) => tracing::debug!("Discarded orphaned upload: {}", image.file_name),
            Err(e) => tracing::warn!(
                "Failed to discard orphaned upload {}: {}",
                image.file_name,
                e
            ),
        }
    }
}

/// Message returned to the citizen after a submission
pub fn submission_message(category: ReportCategory) -> String {
    format!(
        "Report submitted! Classified as: {}",
        category.as_str().to_uppercase()
    )
}
