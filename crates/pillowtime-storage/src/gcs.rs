use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use url::Url;

use crate::{ObjectStore, PutOptions, StoredObject, TokenSource, error::StorageError};

const DEFAULT_GCS_API_URL: &str = "https://storage.googleapis.com";

/// Google Cloud Storage backend using the JSON API's simple media upload
pub struct GcsStore {
    client: Client,
    base_url: Url,
    bucket: String,
    tokens: TokenSource,
}

/// Subset of the object resource returned after an upload
#[derive(Debug, Deserialize)]
struct ObjectResource {
    #[serde(default)]
    size: Option<String>,
}

impl GcsStore {
    pub fn new(bucket: String, base_url: Option<Url>, tokens: TokenSource) -> crate::error::Result<Self> {
        let base_url = match base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_GCS_API_URL)
                .map_err(|e| StorageError::Config(format!("invalid default GCS URL: {e}")))?,
        };

        Ok(Self {
            client: pillowtime_core::http_client(),
            base_url,
            bucket,
            tokens,
        })
    }

    fn upload_url(&self, key: &str) -> crate::error::Result<Url> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|()| StorageError::Config(format!("GCS base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["upload", "storage", "v1", "b", self.bucket.as_str(), "o"]);

        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", key);

        Ok(url)
    }
}

#[async_trait]
impl ObjectStore for GcsStore {
    async fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> crate::error::Result<StoredObject> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey("object key must not be empty".to_owned()));
        }

        let url = self.upload_url(key)?;
        let size = body.len() as u64;

        tracing::debug!(bucket = %self.bucket, key, size, "uploading object to GCS");

        // The timeout covers the token lookup as well as the request
        let upload = async {
            let token = self.tokens.token().await?;

            self.client
                .post(url)
                .bearer_auth(token.expose_secret())
                .header(http::header::CONTENT_TYPE, &options.content_type)
                .body(body)
                .send()
                .await
                .map_err(|e| StorageError::Connection(e.to_string()))
        };

        let response = tokio::time::timeout(options.timeout, upload)
            .await
            .map_err(|_| StorageError::Timeout(options.timeout))??;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        // The object resource is informational; a body we cannot parse does not undo the upload
        let stored_size = match response.json::<ObjectResource>().await {
            Ok(resource) => resource.size.and_then(|s| s.parse().ok()).unwrap_or(size),
            Err(e) => {
                tracing::debug!(error = %e, "could not parse GCS object resource");
                size
            }
        };

        Ok(StoredObject {
            bucket: self.bucket.clone(),
            key: key.to_owned(),
            size: stored_size,
        })
    }

    fn name(&self) -> &str {
        "gcs"
    }
}
