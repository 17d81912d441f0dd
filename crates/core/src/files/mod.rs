//! File relay operations.
//!
//! This module holds the request semantics the HTTP layer delegates to:
//! - Upload form validation
//! - Storage key derivation
//! - Provider upload and response normalization into [`FileInfo`]
//! - Identifier validation for delete and lookup

mod error;
mod service;
mod types;

pub use error::FileError;
pub use service::{FileService, UPLOAD_FOLDER};
pub use types::{FileInfo, FilePart, StorageKey, UploadForm, UploadRequest};
