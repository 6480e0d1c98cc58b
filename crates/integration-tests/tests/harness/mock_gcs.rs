//! Mock Google Cloud Storage upload endpoint for integration tests

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderName, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// An object as the mock stored it
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bucket: String,
    pub content_type: String,
    pub authorization: String,
    pub data: Vec<u8>,
}

/// How uploads are answered
#[derive(Debug, Clone)]
enum Behaviour {
    Accept,
    Reject(u16),
    Stall(Duration),
}

/// Mock bucket that keeps uploaded objects in memory
pub struct MockGcs {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockGcsState>,
}

struct MockGcsState {
    behaviour: Behaviour,
    objects: Mutex<HashMap<String, StoredObject>>,
    uploads: Mutex<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadQuery {
    upload_type: String,
    name: String,
}

impl MockGcs {
    /// Start a bucket that accepts every upload
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(Behaviour::Accept).await
    }

    /// Start a bucket that rejects every upload with `status`
    pub async fn start_rejecting(status: u16) -> anyhow::Result<Self> {
        Self::start_inner(Behaviour::Reject(status)).await
    }

    /// Start a bucket that waits `delay` before answering
    pub async fn start_stalling(delay: Duration) -> anyhow::Result<Self> {
        Self::start_inner(Behaviour::Stall(delay)).await
    }

    async fn start_inner(behaviour: Behaviour) -> anyhow::Result<Self> {
        let state = Arc::new(MockGcsState {
            behaviour,
            objects: Mutex::default(),
            uploads: Mutex::default(),
        });

        let app = Router::new()
            .route("/upload/storage/v1/b/{bucket}/o", routing::post(handle_upload))
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

    /// Base URL for configuring the mock as the storage endpoint
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Object currently stored under `name`
    pub fn object(&self, name: &str) -> Option<StoredObject> {
        self.state.objects.lock().unwrap().get(name).cloned()
    }

    /// Names of every upload attempt, in arrival order
    pub fn uploads(&self) -> Vec<String> {
        self.state.uploads.lock().unwrap().clone()
    }
}

impl Drop for MockGcs {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_upload(
    State(state): State<Arc<MockGcsState>>,
    Path(bucket): Path<String>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.uploads.lock().unwrap().push(query.name.clone());

    if query.upload_type != "media" {
        return (StatusCode::BAD_REQUEST, "unsupported uploadType").into_response();
    }

    match state.behaviour {
        Behaviour::Accept => {}
        Behaviour::Reject(status) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            return (status, Json(json!({"error": {"code": status.as_u16(), "message": "denied"}}))).into_response();
        }
        Behaviour::Stall(delay) => tokio::time::sleep(delay).await,
    }

    let object = StoredObject {
        bucket: bucket.clone(),
        content_type: header_value(&headers, header::CONTENT_TYPE),
        authorization: header_value(&headers, header::AUTHORIZATION),
        data: body.to_vec(),
    };

    state.objects.lock().unwrap().insert(query.name.clone(), object);

    Json(json!({
        "kind": "storage#object",
        "bucket": bucket,
        "name": query.name,
        "size": body.len().to_string(),
        "contentType": "audio/mpeg"
    }))
    .into_response()
}

fn header_value(headers: &HeaderMap, name: HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}
