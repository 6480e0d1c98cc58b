use std::time::{Duration, Instant};

use pillowtime_config::GcsCredentials;
use reqwest::Client;
use secrecy::SecretString;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::{Result, StorageError};

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Refresh this long before the metadata server says the token expires
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Supplies bearer tokens for storage uploads
pub enum TokenSource {
    /// A token fixed at startup
    Static(SecretString),
    /// Tokens fetched from the instance metadata server and cached until near expiry
    MetadataServer {
        client: Client,
        url: String,
        cached: Mutex<Option<CachedToken>>,
    },
}

pub struct CachedToken {
    token: SecretString,
    refresh_at: Instant,
}

#[derive(Deserialize)]
struct MetadataToken {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

impl TokenSource {
    /// Resolve configured credentials
    ///
    /// Token files are read once, here.
    pub fn from_config(config: &GcsCredentials) -> Result<Self> {
        match config {
            GcsCredentials::AccessToken { token } => Ok(Self::Static(token.clone())),
            GcsCredentials::TokenFile { path } => {
                let contents = std::fs::read_to_string(path).map_err(|e| {
                    StorageError::Credentials(format!("failed to read token file {}: {e}", path.display()))
                })?;
                let token = contents.trim();

                if token.is_empty() {
                    return Err(StorageError::Credentials(format!(
                        "token file {} is empty",
                        path.display()
                    )));
                }

                Ok(Self::Static(SecretString::from(token.to_owned())))
            }
            GcsCredentials::MetadataServer => Ok(Self::metadata_server(METADATA_TOKEN_URL.to_owned())),
        }
    }

    /// Metadata server source reading tokens from `url`
    pub fn metadata_server(url: String) -> Self {
        Self::MetadataServer {
            client: pillowtime_core::http_client(),
            url,
            cached: Mutex::new(None),
        }
    }

    /// Current access token
    pub async fn token(&self) -> Result<SecretString> {
        match self {
            Self::Static(token) => Ok(token.clone()),
            Self::MetadataServer { client, url, cached } => {
                let mut cached = cached.lock().await;

                if let Some(entry) = cached.as_ref()
                    && Instant::now() < entry.refresh_at
                {
                    return Ok(entry.token.clone());
                }

                let fetched = fetch_metadata_token(client, url).await?;
                let lifetime = Duration::from_secs(fetched.expires_in).saturating_sub(EXPIRY_MARGIN);
                let token = SecretString::from(fetched.access_token);

                *cached = Some(CachedToken {
                    token: token.clone(),
                    refresh_at: Instant::now() + lifetime,
                });

                tracing::debug!(expires_in = fetched.expires_in, "fetched storage access token");

                Ok(token)
            }
        }
    }
}

async fn fetch_metadata_token(client: &Client, url: &str) -> Result<MetadataToken> {
    let response = client
        .get(url)
        .header("Metadata-Flavor", "Google")
        .send()
        .await
        .map_err(|e| StorageError::Credentials(format!("metadata server unreachable: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(StorageError::Credentials(format!(
            "metadata server returned {status}: {body}"
        )));
    }

    let token: MetadataToken = response
        .json()
        .await
        .map_err(|e| StorageError::Credentials(format!("invalid metadata token response: {e}")))?;

    if token.access_token.is_empty() {
        return Err(StorageError::Credentials("metadata server returned an empty token".to_owned()));
    }

    Ok(token)
}
