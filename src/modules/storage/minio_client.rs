//! MinIO/S3-compatible storage backend
//!
//! Uses rust-s3 crate for lightweight S3 operations. Report images are
//! written under the public prefix and addressed by their public URL, so the
//! bucket must allow anonymous reads on that prefix.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use tracing::{debug, info, warn};

use super::FileStorage;
use crate::core::config::MinIOConfig;
use crate::core::error::{AppError, Result};

/// MinIO/S3-compatible storage client
pub struct MinIOStorage {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    public_endpoint: String,
    public_prefix: String,
}

impl MinIOStorage {
    /// Create a new MinIO client from configuration
    pub fn new(config: MinIOConfig) -> Result<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Storage(format!("Failed to create MinIO credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Storage(format!("Failed to create MinIO bucket: {}", e)))?;

        // Use path-style URLs for MinIO (http://endpoint/bucket instead of http://bucket.endpoint)
        bucket.set_path_style();

        info!(
            "MinIO storage configured for endpoint: {}, bucket: {}, prefix: {}",
            config.endpoint,
            bucket.name(),
            config.public_prefix
        );

        Ok(Self {
            bucket,
            region,
            credentials,
            public_endpoint: config.public_endpoint.trim_end_matches('/').to_string(),
            public_prefix: config.public_prefix.trim_matches('/').to_string(),
        })
    }

    /// Ensure the bucket exists, create if not
    pub async fn ensure_bucket_exists(&self) -> Result<()> {
        let created = Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await;

        match created {
            Ok(_) => {
                info!("Bucket '{}' created successfully", self.bucket.name());
            }
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                }
            }
        }

        Ok(())
    }

    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }

    fn object_key(&self, file_name: &str) -> String {
        format!("{}/{}", self.public_prefix, file_name)
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_endpoint, self.bucket.name(), key)
    }
}

#[async_trait]
impl FileStorage for MinIOStorage {
    async fn store(
        &self,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<Option<String>> {
        let key = self.object_key(file_name);

        // S3 has no create-if-absent put; a racing writer between the check
        // and the put can still win.
        let exists = self.bucket.object_exists(&key).await.map_err(|e| {
            AppError::Storage(format!("Failed to check object '{}': {}", key, e))
        })?;
        if exists {
            debug!("Object name already taken: {}", key);
            return Ok(None);
        }

        let response = self
            .bucket
            .put_object_with_content_type(&key, data, content_type)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload file '{}': {}", key, e)))?;

        if !(200..300).contains(&response.status_code()) {
            return Err(AppError::Storage(format!(
                "Upload of '{}' rejected with HTTP {}",
                key,
                response.status_code()
            )));
        }

        debug!("Uploaded file '{}' to bucket '{}'", key, self.bucket.name());
        Ok(Some(self.public_url(&key)))
    }

    async fn remove(&self, file_name: &str) -> Result<()> {
        let key = self.object_key(file_name);

        let response = self
            .bucket
            .delete_object(&key)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to delete file '{}': {}", key, e)))?;

        // S3 answers 204 for deletes, also when the key was already gone
        if !(200..300).contains(&response.status_code()) {
            return Err(AppError::Storage(format!(
                "Delete of '{}' rejected with HTTP {}",
                key,
                response.status_code()
            )));
        }

        debug!("Deleted file '{}' from bucket '{}'", key, self.bucket.name());
        Ok(())
    }
}
