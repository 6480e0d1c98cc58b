//! Chat completion client used to write bedtime stories
//!
//! Wraps an `OpenAI`-compatible `/chat/completions` endpoint behind the
//! [`Provider`] trait so the HTTP layer can be exercised with stubs.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
pub mod protocol;
pub mod provider;
pub mod types;

use std::sync::Arc;

pub use error::{LlmError, Result};
pub use provider::{Provider, openai::OpenAiProvider};
pub use types::{Choice, CompletionRequest, CompletionResponse, Message, Role};

/// Build the chat completion provider from configuration
pub fn build_provider(config: &pillowtime_config::Config) -> anyhow::Result<Arc<dyn Provider>> {
    let provider = OpenAiProvider::new("openai".to_owned(), &config.openai)
        .map_err(|e| anyhow::anyhow!("Failed to initialize chat completion provider: {e}"))?;

    tracing::debug!(model = %config.llm.model, "chat completion provider initialized");

    Ok(Arc::new(provider))
}
