//! Crate-level error types.
//!
//! [`DepthviewError`] unifies every error source (configuration,
//! WebSocket, JSON, malformed feed messages) behind a single enum so
//! callers can match on the variant they care about while still using
//! the `?` operator for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DepthviewError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum DepthviewError {
    /// A configuration value was missing or could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A WebSocket operation (connect, send, receive) failed.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A feed message was unparseable or missing required fields.
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// Terminal setup or teardown failed.
    #[error("io error: {0}")]
    Io(String),
}
