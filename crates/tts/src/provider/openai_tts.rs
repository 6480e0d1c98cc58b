use async_trait::async_trait;
use pillowtime_config::OpenAiConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{
    error::TtsError,
    types::{SpeechRequest, SpeechResponse},
};

use super::TtsProvider;

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// `OpenAI` TTS provider
pub struct OpenAiTtsProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    name: String,
}

impl OpenAiTtsProvider {
    pub fn new(name: String, config: &OpenAiConfig) -> crate::error::Result<Self> {
        let base_url = match &config.base_url {
            Some(url) => url.as_str().trim_end_matches('/').to_owned(),
            None => Url::parse(DEFAULT_OPENAI_API_URL)
                .map_err(|e| TtsError::ConfigError(format!("invalid default base URL: {e}")))?
                .as_str()
                .trim_end_matches('/')
                .to_owned(),
        };

        Ok(Self {
            client: pillowtime_core::http_client(),
            base_url,
            api_key: config.api_key.clone(),
            name,
        })
    }
}

#[async_trait]
impl TtsProvider for OpenAiTtsProvider {
    async fn synthesize(&self, request: &SpeechRequest) -> crate::error::Result<SpeechResponse> {
        let url = format!("{}/audio/speech", self.base_url);

        tracing::debug!(
            "OpenAI TTS request: model={}, voice={}, input_len={}",
            request.model,
            request.voice,
            request.input.len(),
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI TTS request failed: {e}");
                TtsError::ConnectionError(format!("Failed to send request to OpenAI TTS: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("OpenAI TTS API error ({status}): {error_text}");

            return Err(TtsError::from_status(status.as_u16(), error_text));
        }

        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read OpenAI TTS response body: {e}");
            TtsError::AudioRead(e.to_string())
        })?;

        tracing::debug!("OpenAI TTS synthesis complete, {} bytes", audio.len());

        Ok(SpeechResponse {
            audio: audio.to_vec(),
            content_type,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
