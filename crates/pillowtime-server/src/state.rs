use std::sync::Arc;

use pillowtime_config::{Config, LlmConfig};
use pillowtime_core::Voice;
use pillowtime_llm::Provider;
use pillowtime_storage::{ObjectKeys, ObjectStore, PutOptions};
use tts::TtsProvider;

/// Everything a request handler needs, built once at startup and shared read-only
pub struct AppState {
    /// Chat completion backend
    pub llm: Arc<dyn Provider>,
    /// Speech synthesis backend
    pub tts: Arc<dyn TtsProvider>,
    /// Where audio is uploaded
    pub store: Arc<dyn ObjectStore>,
    /// Story request parameters
    pub story: LlmConfig,
    /// Speech model identifier
    pub tts_model: String,
    /// Voice used for prompt-generated stories
    pub default_voice: Voice,
    /// Object key strategy
    pub keys: ObjectKeys,
    /// Content type and timeout applied to every upload
    pub put_options: PutOptions,
}

impl AppState {
    /// Build the provider and storage clients from configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let llm = pillowtime_llm::build_provider(config)?;
        let tts = tts::build_provider(config)?;
        let store = pillowtime_storage::build_store(&config.storage)?;

        Ok(Self {
            llm,
            tts,
            store,
            story: config.llm.clone(),
            tts_model: config.tts.model.clone(),
            default_voice: config.tts.default_voice,
            keys: ObjectKeys::from_config(&config.storage),
            put_options: PutOptions {
                content_type: config.storage.content_type.clone(),
                timeout: config.storage.upload_timeout()?,
            },
        })
    }
}
