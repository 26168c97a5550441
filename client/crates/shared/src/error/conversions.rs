//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`].

use super::app_error::AppError;
use super::kind::ErrorKind;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::Forbidden,
            std::io::ErrorKind::TimedOut => ErrorKind::RequestTimeout,
            _ => ErrorKind::InternalServerError,
        };
        AppError::new(kind, "I/O operation failed").with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        // The API is the only JSON producer we read, so a bad body is its fault.
        AppError::internal("Unexpected response from the quiz service").with_source(err)
    }
}

// ============================================================================
// HTTP conversions (feature-gated)
// ============================================================================

#[cfg(feature = "http")]
impl From<http::StatusCode> for ErrorKind {
    fn from(status: http::StatusCode) -> Self {
        ErrorKind::from_status(status.as_u16())
    }
}
