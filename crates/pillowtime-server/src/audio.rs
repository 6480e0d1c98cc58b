//! Prompt-to-audio and text-to-audio pipelines

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};
use http::StatusCode;
use pillowtime_core::Voice;
use pillowtime_llm::CompletionRequest;
use tts::SpeechRequest;

use crate::{
    request::{DirectAudioRequest, ExtractPayload, PromptRequest},
    state::AppState,
};

/// Terminal states of an audio request
///
/// Bodies are plain text; failure details only go to the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioReply {
    /// Audio synthesized and stored
    Success,
    /// The model answered with blank text; nothing was synthesized
    NoTextGenerated,
    /// The model answered without any candidate
    NoChoices,
    /// Chat completion or speech synthesis failed
    ProviderFailed,
    /// The audio could not be stored
    UploadFailed,
}

impl AudioReply {
    pub const fn status(self) -> StatusCode {
        match self {
            Self::Success | Self::NoTextGenerated => StatusCode::OK,
            Self::NoChoices | Self::ProviderFailed | Self::UploadFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn body(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NoTextGenerated => "No text generated",
            Self::NoChoices => "No choices available",
            Self::ProviderFailed => "Open API Request failed",
            Self::UploadFailed => "Something went wrong!",
        }
    }
}

impl IntoResponse for AudioReply {
    fn into_response(self) -> Response {
        (self.status(), self.body()).into_response()
    }
}

/// Routes for both audio endpoints
pub fn audio_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generateAudioFromPrompt", post(generate_audio_from_prompt))
        .route("/createAudioFromText", post(create_audio_from_text))
}

/// Ask the model for a bedtime story, then narrate it with the default voice
async fn generate_audio_from_prompt(
    State(state): State<Arc<AppState>>,
    ExtractPayload(request): ExtractPayload<PromptRequest>,
) -> AudioReply {
    let completion = CompletionRequest::bedtime_story(&state.story, &request.prompt);

    let response = match state.llm.complete(&completion).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(provider = state.llm.name(), error = %e, "chat completion request failed");
            return AudioReply::ProviderFailed;
        }
    };

    tracing::debug!(id = ?response.id, choices = response.choices.len(), "chat completion received");

    let Some(text) = response.first_text() else {
        tracing::warn!("chat completion returned no choices");
        return AudioReply::NoChoices;
    };

    if text.is_empty() {
        tracing::info!("chat completion returned no text");
        return AudioReply::NoTextGenerated;
    }

    tracing::info!(chars = text.len(), "story generated");
    tracing::debug!(text, "generated story");

    request_audio_from_text(&state, state.default_voice, text).await
}

/// Narrate caller-supplied text
async fn create_audio_from_text(
    State(state): State<Arc<AppState>>,
    ExtractPayload(request): ExtractPayload<DirectAudioRequest>,
) -> AudioReply {
    request_audio_from_text(&state, request.voice, &request.input).await
}

/// Synthesize `input` and store the audio
///
/// Upload is only attempted once synthesis succeeded.
pub async fn request_audio_from_text(state: &AppState, voice: Voice, input: &str) -> AudioReply {
    let request = SpeechRequest {
        model: state.tts_model.clone(),
        voice,
        input: input.to_owned(),
    };

    let speech = match state.tts.synthesize(&request).await {
        Ok(speech) => speech,
        Err(e) => {
            tracing::error!(provider = state.tts.name(), %voice, error = %e, "speech synthesis failed");
            return AudioReply::ProviderFailed;
        }
    };

    tracing::debug!(
        bytes = speech.audio.len(),
        content_type = %speech.content_type,
        "speech synthesized"
    );

    let key = state.keys.next_key();

    match state.store.put(&key, speech.audio, &state.put_options).await {
        Ok(stored) => {
            tracing::info!(
                backend = state.store.name(),
                bucket = %stored.bucket,
                key = %stored.key,
                size = stored.size,
                "audio uploaded"
            );
            AudioReply::Success
        }
        Err(e) => {
            tracing::error!(backend = state.store.name(), %key, error = %e, "audio upload failed");
            AudioReply::UploadFailed
        }
    }
}
