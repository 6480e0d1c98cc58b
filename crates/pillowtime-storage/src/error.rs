use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Object storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The upload did not finish within the configured timeout
    #[error("upload timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The storage service rejected the upload
    #[error("storage service returned {status}: {message}")]
    Rejected { status: u16, message: String },

    /// Network or connection error
    #[error("connection error: {0}")]
    Connection(String),

    /// No usable access token
    #[error("credentials error: {0}")]
    Credentials(String),

    /// The key is not acceptable for this backend
    #[error("invalid object key: {0}")]
    InvalidKey(String),

    /// Filesystem error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
