#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod provider;
mod types;

use std::sync::Arc;

pub use error::{Result, TtsError};
pub use provider::{TtsProvider, openai_tts::OpenAiTtsProvider};
pub use types::{SpeechRequest, SpeechResponse};

/// Build the speech synthesis provider from configuration
pub fn build_provider(config: &pillowtime_config::Config) -> anyhow::Result<Arc<dyn TtsProvider>> {
    let provider = OpenAiTtsProvider::new("openai".to_owned(), &config.openai)
        .map_err(|e| anyhow::anyhow!("Failed to initialize TTS provider: {e}"))?;

    tracing::debug!(model = %config.tts.model, "TTS provider initialized");

    Ok(Arc::new(provider))
}
