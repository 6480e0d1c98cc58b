use pillowtime_core::Voice;
use serde::Deserialize;

/// Speech synthesis parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Speech model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Voice used when the story comes from a prompt
    #[serde(default)]
    pub default_voice: Voice,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            default_voice: Voice::default(),
        }
    }
}

fn default_model() -> String {
    "tts-1".to_owned()
}
