use std::time::Duration;

use thiserror::Error;

/// Failure to obtain usable text from a generative backend.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("backend not configured: {0}")]
    NotConfigured(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("prompt blocked by backend: {0}")]
    Blocked(String),
    #[error("backend returned no text")]
    EmptyResponse,
}

/// Result type for generation calls.
pub type Result<T> = std::result::Result<T, GenerationError>;
