//! Shared helpers for router tests.

use std::sync::Arc;

use axum::response::Response;
use filesync_core::files::FileService;
use filesync_shared::CredentialStatus;
use http_body_util::BodyExt;
use serde_json::Value;

pub use filesync_core::testing::{Call, MOCK_FILE_ID, MockProvider};

use crate::AppState;

const BOUNDARY: &str = "filesync-test-boundary";

/// State with every credential present and a 5 MiB limit.
pub fn test_state(provider: &Arc<MockProvider>) -> AppState {
    AppState {
        files: FileService::new(provider.clone()),
        credentials: CredentialStatus {
            public_key: true,
            private_key: true,
            url_endpoint: true,
        },
        max_file_size: 5 * 1024 * 1024,
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Build a `multipart/form-data` body. Returns the content type and the body.
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, Option<&str>, &[u8])>,
) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((file_name, content_type, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        if let Some(content_type) = content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
