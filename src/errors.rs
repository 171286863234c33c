//! Itchwarden error types.

use thiserror::Error;

/// Errors that can occur while talking to itch.io or the local cache.
#[derive(Debug, Error)]
pub enum ItchError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The client has been shut down and no longer accepts requests.
    #[error("Client is not ready")]
    NotReady,

    /// No itch.io API key configured.
    #[error("itch.io API key not set")]
    MissingApiKey,

    /// A required parameter was empty and had no configured fallback.
    #[error("Missing required parameter: {name}")]
    MissingParameter {
        /// Name of the missing parameter.
        name: &'static str,
    },

    /// HTTP transport error communicating with itch.io.
    #[error("Request failed: {0}")]
    TransportError(String),

    /// Response body could not be parsed.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Verification store I/O error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Encryption or decryption of the verification store failed.
    #[error("Cipher error: {0}")]
    CipherError(String),

    /// The system browser could not be opened.
    #[error("Failed to open browser: {0}")]
    BrowserLaunch(String),
}
