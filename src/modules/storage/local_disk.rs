use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::FileStorage;
use crate::core::config::LocalStorageConfig;
use crate::core::error::{AppError, Result};

/// Stores uploads in a directory that the HTTP layer serves read-only
pub struct LocalDiskStorage {
    upload_dir: PathBuf,
    public_path: String,
}

impl LocalDiskStorage {
    pub fn new(config: LocalStorageConfig) -> Self {
        Self {
            upload_dir: config.upload_dir,
            public_path: config.public_path.trim_end_matches('/').to_string(),
        }
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir_exists(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| {
                AppError::Storage(format!(
                    "Failed to create upload directory '{}': {}",
                    self.upload_dir.display(),
                    e
                ))
            })?;

        info!("Upload directory ready: {}", self.upload_dir.display());
        Ok(())
    }

    pub fn upload_dir(&self) -> &PathBuf {
        &self.upload_dir
    }
}

#[async_trait]
impl FileStorage for LocalDiskStorage {
    async fn store(
        &self,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<Option<String>> {
        let path = self.upload_dir.join(file_name);

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!("Upload name already taken: {}", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to create file '{}': {}",
                    path.display(),
                    e
                )))
            }
        };

        let written = match file.write_all(data).await {
            Ok(()) => file.flush().await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            // Don't leave a truncated file claiming the name
            let _ = tokio::fs::remove_file(&path).await;
            return Err(AppError::Storage(format!(
                "Failed to write file '{}': {}",
                path.display(),
                e
            )));
        }

        debug!(
            "Stored upload '{}' ({}, {} bytes)",
            path.display(),
            content_type,
            data.len()
        );

        Ok(Some(format!("{}/{}", self.public_path, file_name)))
    }

    async fn remove(&self, file_name: &str) -> Result<()> {
        let path = self.upload_dir.join(file_name);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed upload '{}'", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to remove file '{}': {}",
                path.display(),
                e
            ))),
        }
    }
}
