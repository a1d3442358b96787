//! Error types for the outer collaborators.
//!
//! Indicator math and the signal engine do not fail: missing data is `None`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("{0} channel is not configured")]
    NotConfigured(&'static str),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{channel} rejected the message: {reason}")]
    Rejected { channel: &'static str, reason: String },
}

impl NotifyError {
    /// Only transport failures are worth another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, NotifyError::Http(_))
    }
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("no session token configured")]
    MissingSession,

    #[error("session token rejected or expired")]
    InvalidSession,

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("no data available for {0}")]
    NoData(String),
}

impl FeedError {
    pub fn is_transient(&self) -> bool {
        matches!(self, FeedError::Http(_) | FeedError::WebSocket(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
