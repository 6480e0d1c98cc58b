//! Mock `OpenAI` backend for integration tests
//!
//! Serves `/v1/chat/completions` and `/v1/audio/speech` with canned behaviour
//! and records every request body it receives.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// How the chat endpoint answers
#[derive(Debug, Clone)]
pub enum Chat {
    /// One choice with this content (`None` sends `null`)
    Reply(Option<String>),
    /// An empty `choices` array
    NoChoices,
    /// An error status with a JSON error body
    Status(u16),
    /// A 200 response whose body is not JSON
    Garbage,
}

/// How the speech endpoint answers
#[derive(Debug, Clone)]
pub enum Speech {
    /// Raw audio bytes with `audio/mpeg`
    Audio(Vec<u8>),
    /// An error status with a JSON error body
    Status(u16),
}

/// Mock provider that returns predictable responses
pub struct MockOpenAi {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    chat: Chat,
    speech: Speech,
    chat_requests: Mutex<Vec<Value>>,
    speech_requests: Mutex<Vec<Value>>,
    authorizations: Mutex<Vec<String>>,
}

impl MockOpenAi {
    /// Start the mock server, returning immediately
    pub async fn start(chat: Chat, speech: Speech) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            chat,
            speech,
            chat_requests: Mutex::default(),
            speech_requests: Mutex::default(),
            authorizations: Mutex::default(),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .route("/v1/audio/speech", routing::post(handle_speech))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Start a mock that tells the story `text` and speaks `audio`
    pub async fn storyteller(text: &str, audio: &[u8]) -> anyhow::Result<Self> {
        Self::start(Chat::Reply(Some(text.to_owned())), Speech::Audio(audio.to_vec())).await
    }

    /// Base URL for configuring the mock as the provider
    ///
    /// Includes `/v1` since the provider appends paths like `/chat/completions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Chat request bodies received so far
    pub fn chat_requests(&self) -> Vec<Value> {
        self.state.chat_requests.lock().unwrap().clone()
    }

    /// Speech request bodies received so far
    pub fn speech_requests(&self) -> Vec<Value> {
        self.state.speech_requests.lock().unwrap().clone()
    }

    /// `Authorization` headers received so far
    pub fn authorizations(&self) -> Vec<String> {
        self.state.authorizations.lock().unwrap().clone()
    }
}

impl Drop for MockOpenAi {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn record_authorization(state: &MockState, headers: &HeaderMap) {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    state.authorizations.lock().unwrap().push(value);
}

fn error_response(status: u16) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = json!({
        "error": {
            "message": "mock provider error",
            "type": "invalid_request_error"
        }
    });
    (status, Json(body)).into_response()
}

async fn handle_chat_completions(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record_authorization(&state, &headers);
    let model = body["model"].as_str().unwrap_or("unknown").to_owned();
    state.chat_requests.lock().unwrap().push(body);

    match &state.chat {
        Chat::Reply(content) => Json(json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": model,
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 20, "completion_tokens": 10, "total_tokens": 30}
        }))
        .into_response(),
        Chat::NoChoices => Json(json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": model,
            "choices": []
        }))
        .into_response(),
        Chat::Status(status) => error_response(*status),
        Chat::Garbage => (StatusCode::OK, "<html>gateway</html>").into_response(),
    }
}

async fn handle_speech(State(state): State<Arc<MockState>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    record_authorization(&state, &headers);
    state.speech_requests.lock().unwrap().push(body);

    match &state.speech {
        Speech::Audio(audio) => ([(header::CONTENT_TYPE, "audio/mpeg")], audio.clone()).into_response(),
        Speech::Status(status) => error_response(*status),
    }
}
