//! Core error types for hafiz-core.
//!
//! Remote failures, client-side validation rejections and configuration
//! problems each get their own enum; `CoreError` sits on top. "No due item"
//! and "no pending segment" are session phases, not errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for hafiz-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A remote operation failed.
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Rejected client-side before any remote call.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration load/save problems.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of the remote scheduling/catalog services.
///
/// Every variant carries a human-readable message; callers surface it and
/// fall back to a defined state (empty queue, unchanged segment, previous
/// event list).
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The service answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// The request never completed (connect, timeout, abort).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}

/// Client-side rejections.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Grading quality outside the session's scale.
    #[error("Quality {quality} is not in the allowed scale {allowed:?}")]
    QualityOutOfRange { quality: u8, allowed: Vec<u8> },

    /// Completing a segment whose content set is empty would create a
    /// schedule for zero material.
    #[error("Segment {segment_id} has no content to learn")]
    EmptyContent { segment_id: i64 },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
