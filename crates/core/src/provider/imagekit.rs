//! ImageKit implementation of [`MediaProvider`].

use async_trait::async_trait;
use filesync_shared::ImageKitCredentials;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use super::{MediaProvider, ProviderError, ProviderUpload, UploadedFile};

/// Error body returned by the ImageKit API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// HTTP client for the ImageKit upload and management APIs.
///
/// Requests authenticate with HTTP Basic, private key as the user name and an
/// empty password.
#[derive(Clone)]
pub struct ImageKitClient {
    client: reqwest::Client,
    private_key: String,
    upload_api_url: Url,
    api_url: Url,
}

impl ImageKitClient {
    /// Create a client from validated credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if a base URL is invalid or the HTTP client cannot be built.
    pub fn new(credentials: &ImageKitCredentials) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("filesync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::configuration(e.to_string()))?;

        Ok(Self {
            client,
            private_key: credentials.private_key.clone(),
            upload_api_url: parse_base(&credentials.upload_api_url)?,
            api_url: parse_base(&credentials.api_url)?,
        })
    }

    /// `{upload_api_url}/api/v1/files/upload`
    fn upload_endpoint(&self) -> Result<Url, ProviderError> {
        with_segments(&self.upload_api_url, &["api", "v1", "files", "upload"])
    }

    /// `{api_url}/v1/files/{file_id}[/details]`, with `file_id` encoded as one segment.
    fn file_endpoint(&self, file_id: &str, details: bool) -> Result<Url, ProviderError> {
        if details {
            with_segments(&self.api_url, &["v1", "files", file_id, "details"])
        } else {
            with_segments(&self.api_url, &["v1", "files", file_id])
        }
    }
}

fn parse_base(raw: &str) -> Result<Url, ProviderError> {
    let url = Url::parse(raw)
        .map_err(|e| ProviderError::configuration(format!("invalid base URL '{raw}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ProviderError::configuration(format!(
            "invalid base URL '{raw}'"
        )));
    }
    Ok(url)
}

fn with_segments(base: &Url, segments: &[&str]) -> Result<Url, ProviderError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ProviderError::configuration("base URL cannot carry a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Pass success responses through; turn everything else into a typed error.
async fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited(message),
        _ => ProviderError::Api {
            status: status.as_u16(),
            message,
        },
    })
}

#[async_trait]
impl MediaProvider for ImageKitClient {
    fn name(&self) -> &'static str {
        "imagekit"
    }

    #[tracing::instrument(
        skip(self, request),
        fields(file_name = %request.file_name, folder = %request.folder, size = request.bytes.len())
    )]
    async fn upload(&self, request: ProviderUpload) -> Result<UploadedFile, ProviderError> {
        let url = self.upload_endpoint()?;

        // The stored name comes from `fileName`; the part only needs the last segment.
        let part_name = request
            .file_name
            .rsplit('/')
            .next()
            .unwrap_or(&request.file_name)
            .to_string();
        let part = Part::stream(reqwest::Body::from(request.bytes))
            .file_name(part_name)
            .mime_str(&request.content_type)?;

        let form = Form::new()
            .percent_encode_noop()
            .part("file", part)
            .text("fileName", request.file_name)
            .text("folder", request.folder)
            .text("useUniqueFileName", request.use_unique_file_name.to_string());

        debug!(url = %url, "Uploading file to ImageKit");

        let response = self
            .client
            .post(url)
            .basic_auth(&self.private_key, None::<&str>)
            .multipart(form)
            .send()
            .await?;

        let uploaded = check_status(response).await?.json::<UploadedFile>().await?;
        debug!(file_id = %uploaded.file_id, "ImageKit upload complete");
        Ok(uploaded)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, file_id: &str) -> Result<(), ProviderError> {
        let url = self.file_endpoint(file_id, false)?;
        debug!(url = %url, "Deleting file from ImageKit");

        let response = self
            .client
            .delete(url)
            .basic_auth(&self.private_key, None::<&str>)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn details(&self, file_id: &str) -> Result<serde_json::Value, ProviderError> {
        let url = self.file_endpoint(file_id, true)?;
        debug!(url = %url, "Fetching file details from ImageKit");

        let response = self
            .client
            .get(url)
            .basic_auth(&self.private_key, None::<&str>)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }
}
