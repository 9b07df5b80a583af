//! Error types for the live-feed client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The WebSocket handshake or transport failed
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A command could not be encoded as JSON
    #[error("Failed to serialize command: {0}")]
    Serialize(#[from] serde_json::Error),
}
