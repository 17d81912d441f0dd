//! File relay types.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use mime_guess::mime::Mime;
use serde::{Deserialize, Serialize};

use super::error::FileError;

/// Form field carrying the room code.
pub const ROOM_CODE_FIELD: &str = "roomCode";
/// Form field carrying the sender id.
pub const SENDER_ID_FIELD: &str = "senderId";
/// Form field carrying the sender display name.
pub const SENDER_NAME_FIELD: &str = "senderName";

/// The binary part of an upload.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Filename as sent by the client.
    pub file_name: String,
    /// Content type declared on the part, if any.
    pub content_type: Option<String>,
    /// File content.
    pub bytes: Bytes,
}

impl FilePart {
    /// MIME type of the part.
    ///
    /// Uses the declared content type when it parses, otherwise guesses from
    /// the filename extension.
    #[must_use]
    pub fn mime_type(&self) -> String {
        self.content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| ct.parse::<Mime>().is_ok())
            .map_or_else(
                || {
                    mime_guess::from_path(&self.file_name)
                        .first_or_octet_stream()
                        .to_string()
                },
                String::from,
            )
    }

    /// Size in bytes actually received.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Decoded multipart upload, before validation.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    /// The file part, if one was sent.
    pub file: Option<FilePart>,
    /// Text fields by name. A repeated field keeps its last value.
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// Record a text field.
    pub fn insert_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Value of a text field, if present and not blank.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

/// A validated upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// The file.
    pub file: FilePart,
    /// Namespace the file is stored under.
    pub room_code: String,
    /// Uploader id.
    pub sender_id: String,
    /// Uploader display name.
    pub sender_name: String,
}

impl TryFrom<UploadForm> for UploadRequest {
    type Error = FileError;

    /// The file is checked first, then the text fields.
    fn try_from(mut form: UploadForm) -> Result<Self, Self::Error> {
        let file = form.file.take().ok_or(FileError::MissingFile)?;

        let missing: Vec<&'static str> = [ROOM_CODE_FIELD, SENDER_ID_FIELD, SENDER_NAME_FIELD]
            .into_iter()
            .filter(|name| form.field(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(FileError::MissingFields(missing));
        }

        let mut take = |name: &str| form.fields.remove(name).unwrap_or_default();
        Ok(Self {
            file,
            room_code: take(ROOM_CODE_FIELD),
            sender_id: take(SENDER_ID_FIELD),
            sender_name: take(SENDER_NAME_FIELD),
        })
    }
}

/// Name a file is stored under at the provider.
///
/// Format: `{room_code}/{timestamp_millis}-{original_name}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Derive the key for an upload.
    #[must_use]
    pub fn derive(room_code: &str, timestamp_millis: i64, original_name: &str) -> Self {
        Self(format!("{room_code}/{timestamp_millis}-{original_name}"))
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Description of an uploaded file, returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Provider-assigned id.
    pub id: String,
    /// Original filename.
    pub name: String,
    /// URL the provider serves the file from.
    pub url: String,
    /// Size in bytes actually received.
    pub size: u64,
    /// MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Uploader id.
    pub sender_id: String,
    /// Uploader display name.
    pub sender_name: String,
    /// Unix milliseconds at which the upload was processed.
    pub timestamp: i64,
    /// Provider-assigned id, repeated for clients that store both.
    pub provider_file_id: String,
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Property: key is exactly {room}/{timestamp}-{name}
    proptest! {
        #[test]
        fn prop_storage_key_format(
            room in "[a-zA-Z0-9_-]{1,16}",
            timestamp in 0i64..4_102_444_800_000,
            name in "[a-zA-Z0-9 ._()-]{1,40}",
        ) {
            let key = StorageKey::derive(&room, timestamp, &name);

            let (key_room, rest) = key.as_str().split_once('/').expect("has a slash");
            prop_assert_eq!(key_room, room.as_str());

            let (key_ts, key_name) = rest.split_once('-').expect("has a dash");
            prop_assert_eq!(key_ts, timestamp.to_string());
            prop_assert_eq!(key_name, name.as_str());
        }
    }

    // Property: same room and timestamp, different names never collide
    proptest! {
        #[test]
        fn prop_distinct_names_distinct_keys(
            room in "[a-z0-9]{1,8}",
            timestamp in 0i64..4_102_444_800_000,
            a in "[a-zA-Z0-9._-]{1,20}",
            b in "[a-zA-Z0-9._-]{1,20}",
        ) {
            prop_assume!(a != b);
            prop_assert_ne!(
                StorageKey::derive(&room, timestamp, &a),
                StorageKey::derive(&room, timestamp, &b)
            );
        }
    }
}
