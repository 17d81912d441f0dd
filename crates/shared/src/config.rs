//! Application configuration management.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Environment variable holding the ImageKit public key.
pub const PUBLIC_KEY_VAR: &str = "IMAGEKIT_PUBLIC_KEY";
/// Environment variable holding the ImageKit private key.
pub const PRIVATE_KEY_VAR: &str = "IMAGEKIT_PRIVATE_KEY";
/// Environment variable holding the ImageKit URL endpoint.
pub const URL_ENDPOINT_VAR: &str = "IMAGEKIT_URL_ENDPOINT";
/// Environment variable overriding the listen port.
pub const PORT_VAR: &str = "PORT";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload limits.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Storage provider configuration.
    #[serde(default)]
    pub imagekit: ImageKitConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Upload limits.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted file size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
        }
    }
}

fn default_max_file_size() -> usize {
    5 * 1024 * 1024 // 5 MiB
}

/// ImageKit provider configuration as loaded, before validation.
#[derive(Clone, Deserialize)]
pub struct ImageKitConfig {
    /// Public API key.
    #[serde(default)]
    pub public_key: Option<String>,
    /// Private API key, used for request authentication.
    #[serde(default)]
    pub private_key: Option<String>,
    /// URL endpoint files are served from.
    #[serde(default)]
    pub url_endpoint: Option<String>,
    /// Base URL of the upload API.
    #[serde(default = "default_upload_api_url")]
    pub upload_api_url: String,
    /// Base URL of the management API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for ImageKitConfig {
    fn default() -> Self {
        Self {
            public_key: None,
            private_key: None,
            url_endpoint: None,
            upload_api_url: default_upload_api_url(),
            api_url: default_api_url(),
        }
    }
}

fn default_upload_api_url() -> String {
    "https://upload.imagekit.io".to_string()
}

fn default_api_url() -> String {
    "https://api.imagekit.io".to_string()
}

impl fmt::Debug for ImageKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageKitConfig")
            .field("public_key", &self.public_key)
            .field("private_key", &self.private_key.as_ref().map(|_| "[redacted]"))
            .field("url_endpoint", &self.url_endpoint)
            .field("upload_api_url", &self.upload_api_url)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Validated ImageKit credentials. Every field is non-empty.
#[derive(Clone)]
pub struct ImageKitCredentials {
    /// Public API key.
    pub public_key: String,
    /// Private API key.
    pub private_key: String,
    /// URL endpoint files are served from.
    pub url_endpoint: String,
    /// Base URL of the upload API.
    pub upload_api_url: String,
    /// Base URL of the management API.
    pub api_url: String,
}

impl fmt::Debug for ImageKitCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageKitCredentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"[redacted]")
            .field("url_endpoint", &self.url_endpoint)
            .field("upload_api_url", &self.upload_api_url)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Presence of each required provider credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialStatus {
    /// Whether the public key is set.
    pub public_key: bool,
    /// Whether the private key is set.
    pub private_key: bool,
    /// Whether the URL endpoint is set.
    pub url_endpoint: bool,
}

/// Required configuration is absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required environment variables: {}", .0.join(", "))]
pub struct MissingCredentials(pub Vec<&'static str>);

fn is_set(value: Option<&String>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

impl ImageKitConfig {
    /// Reports which credentials are present.
    #[must_use]
    pub fn status(&self) -> CredentialStatus {
        CredentialStatus {
            public_key: is_set(self.public_key.as_ref()),
            private_key: is_set(self.private_key.as_ref()),
            url_endpoint: is_set(self.url_endpoint.as_ref()),
        }
    }

    /// Names of the environment variables whose values are missing or blank.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        let status = self.status();
        [
            (status.public_key, PUBLIC_KEY_VAR),
            (status.private_key, PRIVATE_KEY_VAR),
            (status.url_endpoint, URL_ENDPOINT_VAR),
        ]
        .into_iter()
        .filter_map(|(present, name)| (!present).then_some(name))
        .collect()
    }

    /// Validates the loaded values into usable credentials.
    ///
    /// # Errors
    ///
    /// Returns [`MissingCredentials`] naming every absent variable.
    pub fn credentials(&self) -> Result<ImageKitCredentials, MissingCredentials> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(MissingCredentials(missing));
        }

        Ok(ImageKitCredentials {
            public_key: self.public_key.clone().unwrap_or_default(),
            private_key: self.private_key.clone().unwrap_or_default(),
            url_endpoint: self.url_endpoint.clone().unwrap_or_default(),
            upload_api_url: self.upload_api_url.trim_end_matches('/').to_string(),
            api_url: self.api_url.trim_end_matches('/').to_string(),
        })
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Precedence, lowest first: `config/default`, `config/{RUN_MODE}`,
    /// `FILESYNC__*` variables, then the flat `IMAGEKIT_*` and `PORT` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FILESYNC").separator("__"))
            .set_override_option("imagekit.public_key", non_blank_env(PUBLIC_KEY_VAR))?
            .set_override_option("imagekit.private_key", non_blank_env(PRIVATE_KEY_VAR))?
            .set_override_option("imagekit.url_endpoint", non_blank_env(URL_ENDPOINT_VAR))?
            .set_override_option("server.port", non_blank_env(PORT_VAR))?
            .build()?;

        config.try_deserialize()
    }

    /// Presence flags for the provider credentials.
    #[must_use]
    pub fn credential_status(&self) -> CredentialStatus {
        self.imagekit.status()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
