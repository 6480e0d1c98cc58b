use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// `OpenAI` API access shared by chat completion and speech synthesis
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key, usually supplied through `{{ env.OPEN_AI_API_KEY }}`
    pub api_key: SecretString,
    /// Base URL override (defaults to `https://api.openai.com/v1`)
    #[serde(default)]
    pub base_url: Option<Url>,
}
