use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Speech synthesis errors
#[derive(Debug, Error)]
pub enum TtsError {
    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed (missing or invalid API key)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider API returned an error
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The audio body could not be read
    #[error("Failed to read audio: {0}")]
    AudioRead(String),
}

impl TtsError {
    /// Classify a non-success provider response
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::AuthenticationFailed(message),
            400 => Self::InvalidRequest(message),
            _ => Self::ProviderApiError { status, message },
        }
    }
}
