use axum::body::Body;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use pillowtime_core::Voice;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Body limit for audio requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

/// Body of the prompt-to-audio endpoint
#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    /// Free-text story prompt, forwarded verbatim
    pub prompt: String,
}

/// Body of the direct text-to-audio endpoint
#[derive(Debug, Deserialize)]
pub struct DirectAudioRequest {
    /// Voice to narrate with
    pub voice: Voice,
    /// Text to synthesize
    pub input: String,
}

/// Semantic checks applied after a body deserializes
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for PromptRequest {
    fn validate(&self) -> Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err("`prompt` must not be empty".to_owned());
        }
        Ok(())
    }
}

impl Validate for DirectAudioRequest {
    fn validate(&self) -> Result<(), String> {
        if self.input.trim().is_empty() {
            return Err("`input` must not be empty".to_owned());
        }
        Ok(())
    }
}

/// Extractor for validated JSON request bodies
///
/// Rejections happen before the handler runs, so no provider is called for
/// a malformed body.
pub struct ExtractPayload<T>(pub T);

fn is_json(headers: &http::HeaderMap) -> bool {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

impl<S, T> axum::extract::FromRequest<S> for ExtractPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = Response;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        if !is_json(&parts.headers) {
            return Err((
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported Content-Type, expected: 'Content-Type: application/json'",
            )
                .into_response());
        }

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES).await.map_err(|err| {
            if std::error::Error::source(&err)
                .is_some_and(|source| source.is::<http_body_util::LengthLimitError>())
            {
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    format!("Request body is too large, limit is {BODY_LIMIT_BYTES} bytes"),
                )
            } else {
                (StatusCode::BAD_REQUEST, format!("Failed to read request body: {err}"))
            }
            .into_response()
        })?;

        let payload = serde_json::from_slice::<T>(&bytes).map_err(|e| {
            tracing::debug!(error = %e, "rejected request body");
            (StatusCode::BAD_REQUEST, format!("Failed to parse request body: {e}")).into_response()
        })?;

        payload.validate().map_err(|reason| {
            tracing::debug!(%reason, "rejected request body");
            (StatusCode::BAD_REQUEST, reason).into_response()
        })?;

        Ok(Self(payload))
    }
}
