use std::{path::PathBuf, time::Duration};

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Object storage configuration for synthesized audio
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Object key written on every synthesis (or the suffix source when naming is unique)
    #[serde(default = "default_object_name")]
    pub object_name: String,
    /// How object keys are chosen per request
    #[serde(default)]
    pub naming: ObjectNaming,
    /// Upload timeout as a duration string (e.g. "3s", "500ms")
    #[serde(default = "default_upload_timeout")]
    pub upload_timeout: String,
    /// Content type recorded on the stored object
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// Storage backend
    pub backend: StorageBackendConfig,
}

impl StorageConfig {
    /// Parsed upload timeout
    ///
    /// # Errors
    ///
    /// Returns an error if `upload_timeout` is not a valid duration string
    pub fn upload_timeout(&self) -> anyhow::Result<Duration> {
        duration_str::parse(&self.upload_timeout)
            .map_err(|e| anyhow::anyhow!("invalid storage.upload_timeout '{}': {e}", self.upload_timeout))
    }
}

/// Object key strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectNaming {
    /// Every request overwrites `object_name`; the last upload wins
    #[default]
    Fixed,
    /// Every request writes a fresh key derived from `object_name`
    Unique,
}

/// Supported storage backends
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageBackendConfig {
    /// Google Cloud Storage (the Firebase default bucket included)
    Gcs(GcsConfig),
    /// Local directory, for development
    Local(LocalStorageConfig),
}

/// Google Cloud Storage backend
#[derive(Debug, Deserialize)]
pub struct GcsConfig {
    /// Bucket name (e.g. `my-project.appspot.com`)
    pub bucket: String,
    /// Base URL override (defaults to `https://storage.googleapis.com`)
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Where the OAuth access token comes from
    #[serde(default)]
    pub credentials: GcsCredentials,
}

/// Source of the bearer token used for uploads
#[derive(Debug, Default, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GcsCredentials {
    /// Token supplied inline, usually via `{{ env.VAR }}`
    AccessToken {
        /// The token itself
        token: SecretString,
    },
    /// Token read from a file at startup
    TokenFile {
        /// Path to a file whose trimmed contents are the token
        path: PathBuf,
    },
    /// Token fetched from the instance metadata server
    #[default]
    MetadataServer,
}

/// Local filesystem backend
#[derive(Debug, Deserialize)]
pub struct LocalStorageConfig {
    /// Directory objects are written under
    pub root: PathBuf,
}

fn default_object_name() -> String {
    "test.mp3".to_owned()
}

fn default_upload_timeout() -> String {
    "3s".to_owned()
}

fn default_content_type() -> String {
    "audio/mpeg".to_owned()
}
