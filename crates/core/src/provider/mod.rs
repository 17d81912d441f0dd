//! Media storage provider abstraction.
//!
//! The relay never stores bytes itself. Every operation is forwarded to a
//! provider implementing [`MediaProvider`]:
//!
//! ```text
//! ┌──────────────┐   upload(bytes, key, folder)   ┌──────────────────┐
//! │ FileService  │ ─────────────────────────────▶ │  MediaProvider   │
//! │              │   delete(id) / details(id)     │  (ImageKit API)  │
//! └──────────────┘ ─────────────────────────────▶ └──────────────────┘
//! ```

mod error;
mod imagekit;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

pub use error::ProviderError;
pub use imagekit::ImageKitClient;

/// A single upload call.
#[derive(Debug, Clone)]
pub struct ProviderUpload {
    /// Raw file content.
    pub bytes: Bytes,
    /// Name to store the file under.
    pub file_name: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Logical folder on the provider.
    pub folder: String,
    /// Let the provider rename the file to avoid collisions.
    pub use_unique_file_name: bool,
}

/// Provider response to a successful upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Provider-assigned identifier. Empty when the provider omitted it.
    #[serde(default)]
    pub file_id: String,
    /// URL the file is served from.
    #[serde(default)]
    pub url: String,
    /// Name the provider stored the file under.
    #[serde(default)]
    pub name: Option<String>,
    /// Full path within the provider's media library.
    #[serde(default)]
    pub file_path: Option<String>,
    /// Stored size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
}

/// Remote media storage.
#[async_trait]
pub trait MediaProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Store a file.
    async fn upload(&self, request: ProviderUpload) -> Result<UploadedFile, ProviderError>;

    /// Delete a file by identifier.
    async fn delete(&self, file_id: &str) -> Result<(), ProviderError>;

    /// Fetch the provider's metadata for a file, verbatim.
    async fn details(&self, file_id: &str) -> Result<serde_json::Value, ProviderError>;
}
