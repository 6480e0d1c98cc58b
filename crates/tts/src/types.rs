use pillowtime_core::Voice;

/// Speech synthesis request following the `OpenAI` TTS API format
#[derive(Debug, Clone, serde::Serialize)]
pub struct SpeechRequest {
    /// Model identifier (e.g. "tts-1")
    pub model: String,
    /// Voice to speak with
    pub voice: Voice,
    /// Text to synthesize into speech
    pub input: String,
}

/// Raw audio returned by a TTS provider
#[derive(Debug, Clone)]
pub struct SpeechResponse {
    /// Audio bytes exactly as the provider sent them
    pub audio: Vec<u8>,
    /// Content type reported by the provider (e.g. "audio/mpeg")
    pub content_type: String,
}
