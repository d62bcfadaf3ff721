//! Error types for the broadcast console

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors raised by the console and its API client
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl AppError {
    /// True when the error came back from the server rather than the transport
    pub fn is_api(&self) -> bool {
        matches!(self, AppError::Api { .. })
    }

    /// HTTP status for server-side errors
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            AppError::HttpClient(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
