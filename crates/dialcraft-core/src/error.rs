//! Core error types for dialcraft-core.
//!
//! Two rules shape this hierarchy: configuration problems are rejected
//! at construction time, and style/renderer problems are isolated per
//! style and never abort the render loop. Nothing here is fatal to the
//! process.

use thiserror::Error;

/// Core error type for dialcraft-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Style registration / renderer errors
    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Style-protocol errors.
///
/// Registration errors (`EmptyId`, `DuplicateId`) surface to the caller;
/// renderer failures are caught by the registry, logged, and downgraded
/// to the raw visibility toggle.
#[derive(Error, Debug)]
pub enum StyleError {
    /// A style descriptor carried an empty id
    #[error("Style id must not be empty")]
    EmptyId,

    /// Two styles registered under the same id
    #[error("Duplicate style id: {0}")]
    DuplicateId(String),

    /// A renderer's own operation failed
    #[error("Renderer failure in style '{id}': {message}")]
    Renderer { id: String, message: String },
}

impl StyleError {
    /// Wrap an arbitrary renderer failure with the offending style id.
    pub fn renderer(id: impl Into<String>, err: impl std::fmt::Display) -> Self {
        StyleError::Renderer {
            id: id.into(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
