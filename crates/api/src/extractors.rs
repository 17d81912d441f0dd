//! Request extractors.

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;
use bytes::BytesMut;
use filesync_core::files::{FilePart, UploadForm};
use filesync_shared::AppError;
use tracing::debug;

use crate::{AppState, error::ApiError};

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Upload form decoded from a `multipart/form-data` body.
///
/// The `file` part is buffered in memory and capped at the configured
/// maximum size; every other non-file part is read as a text field.
#[derive(Debug)]
pub struct UploadMultipart(pub UploadForm);

impl FromRequest<AppState> for UploadMultipart {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(error = %rejection.body_text(), "Request is not a multipart upload");
                AppError::validation("No file uploaded")
            })?;

        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field
                .file_name()
                .filter(|n| !n.is_empty())
                .map(String::from);

            match file_name {
                Some(file_name) if name == FILE_FIELD => {
                    form.file = Some(read_file(field, file_name, state.max_file_size).await?);
                }
                Some(file_name) => {
                    debug!(field = %name, file_name = %file_name, "Ignoring unexpected file part");
                }
                None => {
                    let value = field.text().await.map_err(multipart_error)?;
                    form.insert_field(name, value);
                }
            }
        }

        Ok(Self(form))
    }
}

async fn read_file(
    mut field: Field<'_>,
    file_name: String,
    max_file_size: usize,
) -> Result<FilePart, ApiError> {
    let content_type = field.content_type().map(String::from);
    let mut buf = BytesMut::new();

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if buf.len() + chunk.len() > max_file_size {
            return Err(file_too_large(max_file_size));
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(FilePart {
        file_name,
        content_type,
        bytes: buf.freeze(),
    })
}

fn file_too_large(max_file_size: usize) -> ApiError {
    AppError::PayloadTooLarge(format!(
        "File exceeds the maximum size of {max_file_size} bytes"
    ))
    .into()
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(err.body_text()).into();
    }
    AppError::validation(format!("Invalid multipart body: {}", err.body_text())).into()
}
