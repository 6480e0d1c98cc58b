//! Provider-neutral completion types

use pillowtime_config::LlmConfig;

/// Speaker of a conversational turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// A single conversational turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Chat completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: Option<u32>,
    pub n: Option<u32>,
    pub temperature: Option<f64>,
}

impl CompletionRequest {
    /// Request a single calming story for `prompt`
    ///
    /// The system turn fixes the storyteller persona; the prompt is passed
    /// through verbatim as the user turn.
    pub fn bedtime_story(config: &LlmConfig, prompt: &str) -> Self {
        Self {
            model: config.model.clone(),
            messages: vec![Message::system(&config.system_prompt), Message::user(prompt)],
            max_tokens: Some(config.max_tokens),
            n: Some(1),
            temperature: Some(config.temperature),
        }
    }
}

/// Chat completion response
#[derive(Debug, Clone, Default)]
pub struct CompletionResponse {
    pub id: Option<String>,
    pub model: Option<String>,
    pub choices: Vec<Choice>,
}

/// One ranked candidate
#[derive(Debug, Clone, Default)]
pub struct Choice {
    pub index: u32,
    /// Message content; `None` when the provider sent `null`
    pub content: Option<String>,
    pub finish_reason: Option<String>,
}

impl CompletionResponse {
    /// Trimmed text of the first candidate, or `None` when there are no candidates
    ///
    /// A candidate without content yields an empty string.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.content.as_deref().unwrap_or_default().trim())
    }
}
