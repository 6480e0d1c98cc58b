use serde::Deserialize;

/// Chat completion parameters used to write the story
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Chat model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Upper bound on generated tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Persona given to the model as the system turn
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            system_prompt: default_system_prompt(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o".to_owned()
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_tokens() -> u32 {
    500
}

#[allow(clippy::missing_const_for_fn)]
fn default_temperature() -> f64 {
    0.2
}

fn default_system_prompt() -> String {
    "You are a bedtime story teller. Be as calming as possible".to_owned()
}
