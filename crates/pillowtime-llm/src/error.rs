use thiserror::Error;

pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur while requesting a chat completion
#[derive(Debug, Error)]
pub enum LlmError {
    /// The request never reached the provider or the connection dropped
    #[error("connection error: {0}")]
    Connection(String),

    /// The provider rejected the API key
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The provider rejected the request body
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The provider answered with another non-success status
    #[error("provider returned {status}: {message}")]
    ProviderApi { status: u16, message: String },

    /// The response body did not match the completion schema
    #[error("failed to parse response: {0}")]
    Decode(String),

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl LlmError {
    /// Classify a non-success provider response
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::AuthenticationFailed(message),
            400 => Self::InvalidRequest(message),
            _ => Self::ProviderApi { status, message },
        }
    }
}
