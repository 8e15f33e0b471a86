//! Storage module for uploaded report images
//!
//! Exposes file storage as an injected capability so services never touch
//! the filesystem or object store directly. Two backends exist: the local
//! disk (served back under `/uploads`) and MinIO/S3-compatible storage.

mod local_disk;
mod minio_client;

use std::path::Path;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::shared::validation::FILE_EXTENSION_REGEX;

pub use local_disk::LocalDiskStorage;
pub use minio_client::MinIOStorage;

/// Capability for persisting uploaded bytes
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores `data` under `file_name` and returns the path or URL clients use to fetch it
    ///
    /// Never overwrites: returns `None` when a file with that name already
    /// exists, leaving the existing file untouched.
    async fn store(&self, file_name: &str, content_type: &str, data: &[u8])
        -> Result<Option<String>>;

    /// Delete a file written by `store`. Missing files are not an error.
    async fn remove(&self, file_name: &str) -> Result<()>;
}

/// Build the stored name for an upload: `<field>-<unix millis><ext>`
///
/// `<ext>` is the original file's extension including the dot. Extensions
/// that are not short alphanumeric runs are dropped. Two uploads in the same
/// millisecond get the same name; callers retry with a later timestamp when
/// `FileStorage::store` reports the name as taken.
pub fn generate_file_name(field: &str, original_name: &str, timestamp_millis: i64) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .filter(|ext| FILE_EXTENSION_REGEX.is_match(ext))
        .unwrap_or_default();

    format!("{}-{}{}", field, timestamp_millis, extension)
}
