//! File relay service implementation.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::error::FileError;
use super::types::{FileInfo, StorageKey, UploadForm, UploadRequest};
use crate::provider::{MediaProvider, ProviderUpload};

/// Provider folder every upload is placed in.
pub const UPLOAD_FOLDER: &str = "filesync";

/// Relays file operations to a media provider.
///
/// Stateless apart from the provider handle; safe to share across requests.
#[derive(Clone)]
pub struct FileService {
    provider: Arc<dyn MediaProvider>,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService").finish_non_exhaustive()
    }
}

impl FileService {
    /// Create a new file service.
    #[must_use]
    pub fn new(provider: Arc<dyn MediaProvider>) -> Self {
        Self { provider }
    }

    /// Validate and upload a file, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file or a required field is missing
    /// - The provider call fails
    /// - The provider answers without a file id or URL
    pub async fn upload(&self, form: UploadForm) -> Result<FileInfo, FileError> {
        let request = UploadRequest::try_from(form)?;
        self.upload_validated(request, Utc::now().timestamp_millis())
            .await
    }

    /// Validate and upload a file, stamped with `timestamp_millis`.
    ///
    /// # Errors
    ///
    /// Same as [`FileService::upload`].
    pub async fn upload_at(
        &self,
        form: UploadForm,
        timestamp_millis: i64,
    ) -> Result<FileInfo, FileError> {
        let request = UploadRequest::try_from(form)?;
        self.upload_validated(request, timestamp_millis).await
    }

    async fn upload_validated(
        &self,
        request: UploadRequest,
        timestamp: i64,
    ) -> Result<FileInfo, FileError> {
        let key = StorageKey::derive(&request.room_code, timestamp, &request.file.file_name);
        let mime_type = request.file.mime_type();
        let size = request.file.size();

        let uploaded = self
            .provider
            .upload(ProviderUpload {
                bytes: request.file.bytes,
                file_name: key.as_str().to_owned(),
                content_type: mime_type.clone(),
                folder: UPLOAD_FOLDER.to_string(),
                use_unique_file_name: false,
            })
            .await?;

        if uploaded.file_id.trim().is_empty() || uploaded.url.trim().is_empty() {
            warn!(storage_key = %key, "Provider upload response has no file id or URL");
            return Err(FileError::MalformedUpload);
        }

        info!(
            room_code = %request.room_code,
            storage_key = %key,
            file_id = %uploaded.file_id,
            size,
            "File uploaded"
        );

        Ok(FileInfo {
            id: uploaded.file_id.clone(),
            name: request.file.file_name,
            url: uploaded.url,
            size,
            mime_type,
            sender_id: request.sender_id,
            sender_name: request.sender_name,
            timestamp,
            provider_file_id: uploaded.file_id,
        })
    }

    /// Delete a file at the provider.
    ///
    /// No existence or ownership check is made first.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the provider call fails.
    pub async fn delete(&self, file_id: &str) -> Result<(), FileError> {
        let file_id = require_file_id(file_id)?;
        self.provider.delete(file_id).await?;
        info!(file_id = %file_id, "File deleted");
        Ok(())
    }

    /// Fetch the provider's metadata for a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the provider call fails.
    pub async fn details(&self, file_id: &str) -> Result<serde_json::Value, FileError> {
        let file_id = require_file_id(file_id)?;
        Ok(self.provider.details(file_id).await?)
    }
}

/// Trimmed identifier, or an error when nothing is left.
fn require_file_id(file_id: &str) -> Result<&str, FileError> {
    let trimmed = file_id.trim();
    if trimmed.is_empty() {
        return Err(FileError::MissingFileId);
    }
    Ok(trimmed)
}
