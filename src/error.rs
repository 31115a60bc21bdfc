//! Application-level error types.
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur within the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid tool descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("tool view construction failed: {0}")]
    Render(String),

    #[error("JSON deserialisation error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;
