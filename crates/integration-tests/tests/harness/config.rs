//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;

use pillowtime_config::{
    Config, GcsConfig, GcsCredentials, HealthConfig, LlmConfig, LocalStorageConfig, ObjectNaming, OpenAiConfig,
    ServerConfig, StorageBackendConfig, StorageConfig, TtsConfig,
};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder pointed at a mock `OpenAI` backend, storing to a mock GCS bucket
    pub fn new(openai_base_url: &str, gcs_base_url: &str) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                openai: OpenAiConfig {
                    api_key: SecretString::from("sk-test"),
                    base_url: Some(openai_base_url.parse().expect("valid URL")),
                },
                llm: LlmConfig::default(),
                tts: TtsConfig::default(),
                storage: StorageConfig {
                    object_name: "test.mp3".to_owned(),
                    naming: ObjectNaming::Fixed,
                    upload_timeout: "3s".to_owned(),
                    content_type: "audio/mpeg".to_owned(),
                    backend: StorageBackendConfig::Gcs(GcsConfig {
                        bucket: "pillowtime.appspot.com".to_owned(),
                        base_url: Some(gcs_base_url.parse().expect("valid URL")),
                        credentials: GcsCredentials::AccessToken {
                            token: SecretString::from("ya29.test"),
                        },
                    }),
                },
                telemetry: None,
            },
        }
    }

    /// Write objects to a local directory instead of GCS
    pub fn with_local_storage(mut self, root: &Path) -> Self {
        self.config.storage.backend = StorageBackendConfig::Local(LocalStorageConfig {
            root: root.to_path_buf(),
        });
        self
    }

    /// Give every upload its own key
    pub fn with_unique_names(mut self) -> Self {
        self.config.storage.naming = ObjectNaming::Unique;
        self
    }

    /// Set the upload timeout
    pub fn with_upload_timeout(mut self, timeout: &str) -> Self {
        self.config.storage.upload_timeout = timeout.to_owned();
        self
    }

    /// Override the chat model parameters
    pub fn with_llm(mut self, llm: LlmConfig) -> Self {
        self.config.llm = llm;
        self
    }

    /// Set the voice used for prompt-generated stories
    pub fn with_default_voice(mut self, voice: pillowtime_core::Voice) -> Self {
        self.config.tts.default_voice = voice;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
