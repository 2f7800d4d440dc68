// src/error.rs

use std::fmt;

/// Global Application Error Enum.
/// Centralizes the failure modes of the calendar, catalogue and config layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    // Caller broke a function contract (e.g., negative month count)
    InvalidArgument(String),

    // Input DTO failed validation
    BadRequest(String),

    // Record hidden from the viewer or absent
    NotFound(String),

    // Duplicate key (e.g., issue number already taken)
    Conflict(String),

    // Environment / .env value could not be used
    Config(String),

    // Reading input failed (CLI only)
    Io(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            AppError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "conflict: {}", msg),
            AppError::Config(msg) => write!(f, "configuration error: {}", msg),
            AppError::Io(msg) => write!(f, "i/o error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts validator failures into `AppError::BadRequest`.
/// Allows using `?` on `payload.validate()`.
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}
