// src/error.rs

use std::fmt;

/// Global Application Error Enum.
/// Centralizes the failures that can cross the repository and aggregator seams.
#[derive(Debug)]
pub enum AppError {
    // Store read/write failure
    Storage(String),

    // Input rejected by validation
    BadRequest(String),

    // Post or record does not exist
    NotFound(String),

    // Duplicate action (e.g., second vote by the same user)
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Storage(msg) => write!(f, "storage error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "conflict: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `std::io::Error` into `AppError::Storage`.
/// Allows using `?` operator on file store operations.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("Store I/O failure: {}", err);
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
