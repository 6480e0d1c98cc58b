#![allow(clippy::must_use_candidate)]

mod env;
pub mod llm;
mod loader;
pub mod openai;
pub mod server;
pub mod storage;
pub mod telemetry;
pub mod tts;

use serde::Deserialize;

pub use llm::*;
pub use openai::*;
pub use server::*;
pub use storage::*;
pub use telemetry::{ExportProtocol, LogFormat, OtlpConfig, TelemetryConfig};
pub use tts::*;

/// Top-level Pillowtime configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Provider credentials and endpoint
    pub openai: OpenAiConfig,
    /// Chat completion parameters
    #[serde(default)]
    pub llm: LlmConfig,
    /// Speech synthesis parameters
    #[serde(default)]
    pub tts: TtsConfig,
    /// Where synthesized audio is written
    pub storage: StorageConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
