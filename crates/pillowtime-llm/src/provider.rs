//! Provider trait and implementations for completion backends

pub mod openai;

use async_trait::async_trait;

use crate::types::{CompletionRequest, CompletionResponse};

/// Trait implemented by each chat completion backend
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Send a non-streaming completion request
    async fn complete(&self, request: &CompletionRequest) -> crate::error::Result<CompletionResponse>;
}
