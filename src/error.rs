//! Error types for the artigo-tts library.

use thiserror::Error;

/// Errors produced by the artigo-tts pipeline.
#[derive(Debug, Error)]
pub enum ArtigoTtsError {
    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No API credential configured; the remote service was not contacted
    #[error("no API credential configured")]
    MissingCredential,

    /// The speech provider returned a failure or the call timed out
    #[error("speech synthesis error: {0}")]
    Synthesis(String),

    /// Audio bytes were obtained but could not be written to the store
    #[error("artifact persistence error: {0}")]
    Persistence(String),

    /// Configuration or run setup error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Any other error
    #[error("other error: {0}")]
    Other(String),
}

impl From<&str> for ArtigoTtsError {
    fn from(s: &str) -> Self {
        ArtigoTtsError::Other(s.to_string())
    }
}

impl From<String> for ArtigoTtsError {
    fn from(s: String) -> Self {
        ArtigoTtsError::Other(s)
    }
}

/// Result type for the artigo-tts library.
pub type Result<T> = std::result::Result<T, ArtigoTtsError>;
