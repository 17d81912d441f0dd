//! File relay routes.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Path, State},
    routing::{delete, get, post},
};
use filesync_core::files::{FileError, FileInfo};
use filesync_shared::AppError;
use serde::Serialize;

use crate::{AppState, error::ApiError, extractors::UploadMultipart};

/// Allowance for multipart boundaries, headers and text fields on top of the
/// file size limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Creates the file routes.
pub fn routes(max_file_size: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/api/upload",
            post(upload_file).layer(DefaultBodyLimit::max(
                max_file_size.saturating_add(MULTIPART_OVERHEAD),
            )),
        )
        .route("/api/delete/{file_id}", delete(delete_file))
        .route("/api/delete/", delete(missing_file_id))
        .route("/api/file/{file_id}", get(get_file_details))
        .route("/api/file/", get(missing_file_id))
}

/// Response for a deleted file.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Confirmation message.
    pub message: &'static str,
}

/// POST `/api/upload`
/// Upload a file to the provider and describe it.
async fn upload_file(
    State(state): State<AppState>,
    UploadMultipart(form): UploadMultipart,
) -> Result<Json<FileInfo>, ApiError> {
    state
        .files
        .upload(form)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_file_error(e, "Upload failed"))
}

/// DELETE `/api/delete/{file_id}`
/// Delete a file at the provider.
async fn delete_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state
        .files
        .delete(&file_id)
        .await
        .map_err(|e| ApiError::from_file_error(e, "Delete failed"))?;

    Ok(Json(DeleteResponse {
        message: "File deleted successfully",
    }))
}

/// GET `/api/file/{file_id}`
/// Return the provider's metadata for a file.
async fn get_file_details(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .files
        .details(&file_id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_file_error(e, "Failed to get file details"))
}

/// Empty identifier segment.
async fn missing_file_id() -> ApiError {
    AppError::validation(FileError::MissingFileId.to_string()).into()
}
