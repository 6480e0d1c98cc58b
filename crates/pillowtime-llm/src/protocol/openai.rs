//! `OpenAI` chat completion API wire format types

use serde::{Deserialize, Serialize};

use crate::types::{Choice, CompletionRequest, CompletionResponse};

// -- Request types --

/// `OpenAI` chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<OpenAiMessage>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Number of candidates to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// `OpenAI` message within a request or response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiMessage {
    /// Message role
    pub role: String,
    /// Text content; `null` for refusals and tool calls
    #[serde(default)]
    pub content: Option<String>,
}

// -- Response types --

/// `OpenAI` chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<OpenAiChoice>,
}

/// `OpenAI` completion candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub message: Option<OpenAiMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl From<&CompletionRequest> for OpenAiRequest {
    fn from(request: &CompletionRequest) -> Self {
        Self {
            model: request.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|message| OpenAiMessage {
                    role: message.role.as_str().to_owned(),
                    content: Some(message.content.clone()),
                })
                .collect(),
            max_tokens: request.max_tokens,
            n: request.n,
            temperature: request.temperature,
        }
    }
}

impl From<OpenAiResponse> for CompletionResponse {
    fn from(response: OpenAiResponse) -> Self {
        Self {
            id: response.id,
            model: response.model,
            choices: response
                .choices
                .into_iter()
                .map(|choice| Choice {
                    index: choice.index,
                    content: choice.message.and_then(|message| message.content),
                    finish_reason: choice.finish_reason,
                })
                .collect(),
        }
    }
}
