//! File operation errors.

use thiserror::Error;

use crate::provider::ProviderError;

/// File operation errors.
#[derive(Debug, Error)]
pub enum FileError {
    /// The multipart body had no file part.
    #[error("No file uploaded")]
    MissingFile,

    /// Required text fields were absent or blank.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The file identifier was empty.
    #[error("File ID is required")]
    MissingFileId,

    /// The provider call failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The provider reported success without a usable file identifier.
    #[error("Invalid response from storage provider")]
    MalformedUpload,
}

impl FileError {
    /// Whether the caller sent bad input, as opposed to an upstream failure.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFile | Self::MissingFields(_) | Self::MissingFileId
        )
    }
}
