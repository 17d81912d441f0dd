//! In-memory [`MediaProvider`] for tests.
//!
//! Enabled for this crate's own tests and, through the `test-utils` feature,
//! for dependents that exercise the relay without a live provider.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::provider::{MediaProvider, ProviderError, ProviderUpload, UploadedFile};

/// File id returned by a succeeding [`MockProvider`].
pub const MOCK_FILE_ID: &str = "mock_file_1";

/// A provider call as seen by [`MockProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// An upload, without its bytes.
    Upload {
        /// Storage key the file was sent under.
        file_name: String,
        /// MIME type sent with the content.
        content_type: String,
        /// Provider folder.
        folder: String,
        /// Whether the provider was allowed to rename the file.
        use_unique_file_name: bool,
        /// Content length in bytes.
        len: usize,
    },
    /// A delete by id.
    Delete(String),
    /// A details lookup by id.
    Details(String),
}

#[derive(Debug)]
enum Behavior {
    Succeed,
    Respond(UploadedFile),
    Fail(String),
    Panic(String),
}

/// Provider that records every call and answers from a fixed behavior.
#[derive(Debug)]
pub struct MockProvider {
    calls: Mutex<Vec<Call>>,
    behavior: Behavior,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Every call succeeds; uploads get [`MOCK_FILE_ID`] and a URL built from the key.
    pub fn new() -> Self {
        Self::with_behavior(Behavior::Succeed)
    }

    /// Uploads answer with `response` as-is.
    pub fn responding(response: UploadedFile) -> Self {
        Self::with_behavior(Behavior::Respond(response))
    }

    /// Every call fails with a network error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self::with_behavior(Behavior::Fail(message.to_string()))
    }

    /// Every call panics with `message`.
    pub fn panicking(message: &str) -> Self {
        Self::with_behavior(Behavior::Panic(message.to_string()))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            behavior,
        }
    }

    /// Calls recorded so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock_calls().clone()
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<Call>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: Call) -> Result<(), ProviderError> {
        self.lock_calls().push(call);
        match &self.behavior {
            Behavior::Fail(message) => Err(ProviderError::Network(message.clone())),
            Behavior::Panic(message) => panic!("{message}"),
            Behavior::Succeed | Behavior::Respond(_) => Ok(()),
        }
    }
}

#[async_trait]
impl MediaProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn upload(&self, request: ProviderUpload) -> Result<UploadedFile, ProviderError> {
        self.record(Call::Upload {
            file_name: request.file_name.clone(),
            content_type: request.content_type,
            folder: request.folder,
            use_unique_file_name: request.use_unique_file_name,
            len: request.bytes.len(),
        })?;

        if let Behavior::Respond(response) = &self.behavior {
            return Ok(response.clone());
        }
        Ok(UploadedFile {
            file_id: MOCK_FILE_ID.to_string(),
            url: format!("https://ik.imagekit.io/demo/filesync/{}", request.file_name),
            ..UploadedFile::default()
        })
    }

    async fn delete(&self, file_id: &str) -> Result<(), ProviderError> {
        self.record(Call::Delete(file_id.to_string()))
    }

    async fn details(&self, file_id: &str) -> Result<Value, ProviderError> {
        self.record(Call::Details(file_id.to_string()))?;
        Ok(json!({"fileId": file_id, "name": "notes.txt", "size": 12}))
    }
}
