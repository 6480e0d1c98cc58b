//! Object storage for synthesized audio
//!
//! Backends implement [`ObjectStore`]; [`ObjectKeys`] decides which key each
//! upload is written under.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod credentials;
mod error;
mod gcs;
mod key;
mod local;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use pillowtime_config::{StorageBackendConfig, StorageConfig};

pub use credentials::TokenSource;
pub use error::{Result, StorageError};
pub use gcs::GcsStore;
pub use key::ObjectKeys;
pub use local::LocalStore;

/// Per-upload options
#[derive(Debug, Clone)]
pub struct PutOptions {
    /// Content type recorded on the object
    pub content_type: String,
    /// Upper bound on the whole upload
    pub timeout: Duration,
}

/// Location of a successfully written object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub size: u64,
}

/// Bucket-style binary storage
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `body` under `key`, replacing any existing object
    async fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> Result<StoredObject>;

    /// Backend name used in logs
    fn name(&self) -> &str;
}

/// Build the configured storage backend
pub fn build_store(config: &StorageConfig) -> anyhow::Result<Arc<dyn ObjectStore>> {
    let store: Arc<dyn ObjectStore> = match &config.backend {
        StorageBackendConfig::Gcs(gcs) => {
            let tokens = TokenSource::from_config(&gcs.credentials)
                .map_err(|e| anyhow::anyhow!("Failed to initialize storage credentials: {e}"))?;
            Arc::new(
                GcsStore::new(gcs.bucket.clone(), gcs.base_url.clone(), tokens)
                    .map_err(|e| anyhow::anyhow!("Failed to initialize GCS storage: {e}"))?,
            )
        }
        StorageBackendConfig::Local(local) => Arc::new(LocalStore::new(local.root.clone())),
    };

    tracing::debug!(backend = store.name(), "storage backend initialized");

    Ok(store)
}
