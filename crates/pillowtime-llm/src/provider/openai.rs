//! OpenAI-compatible provider implementation

use async_trait::async_trait;
use pillowtime_config::OpenAiConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::Provider;
use crate::error::LlmError;
use crate::protocol::openai::{OpenAiRequest, OpenAiResponse};
use crate::types::{CompletionRequest, CompletionResponse};

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI-compatible provider
pub struct OpenAiProvider {
    name: String,
    client: Client,
    base_url: Url,
    api_key: SecretString,
}

impl OpenAiProvider {
    /// Create from provider configuration
    pub fn new(name: String, config: &OpenAiConfig) -> crate::error::Result<Self> {
        let base_url = match &config.base_url {
            Some(url) => url.clone(),
            None => Url::parse(DEFAULT_BASE_URL).map_err(|e| LlmError::Internal(e.into()))?,
        };

        Ok(Self {
            name,
            client: pillowtime_core::http_client(),
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Build the chat completions URL
    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &CompletionRequest) -> crate::error::Result<CompletionResponse> {
        let wire_request = OpenAiRequest::from(request);

        tracing::debug!(
            provider = %self.name,
            model = %wire_request.model,
            messages = wire_request.messages.len(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "upstream request failed");
                LlmError::Connection(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                provider = %self.name,
                status = %status,
                "upstream returned error"
            );
            return Err(LlmError::from_status(status.as_u16(), body));
        }

        let wire_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Decode(e.to_string()))?;

        tracing::debug!(provider = %self.name, response = ?wire_response, "chat completion response");

        Ok(wire_response.into())
    }
}
