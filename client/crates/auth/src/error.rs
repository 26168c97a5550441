//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use http::StatusCode;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::config::ConfigError;
use platform::storage::StorageError;
use platform::transport::TransportError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Client-side form validation failed; nothing was sent
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The server answered 401 (after any refresh-and-retry)
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// An operation needs a logged-in user but the session is empty
    #[error("Not logged in")]
    NotAuthenticated,

    /// Any other non-2xx answer
    #[error("Request failed with {status}: {message}")]
    Api { status: StatusCode, message: String },

    /// No response was obtained
    #[error("Network error: {0}")]
    Transport(#[from] TransportError),

    /// A JSON body could not be encoded or did not have the expected shape
    #[error("Malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// Persisting the session failed
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AuthError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AuthError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Whether this is an authentication failure (taxonomy (b)/(c))
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthError::Unauthorized { .. } | AuthError::NotAuthenticated
        )
    }

    /// HTTP status the server answered with, if the error came from a response
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AuthError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            AuthError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation { .. } => ErrorKind::BadRequest,
            AuthError::Unauthorized { .. } | AuthError::NotAuthenticated => {
                ErrorKind::Unauthorized
            }
            AuthError::Api { status, .. } => ErrorKind::from(*status),
            AuthError::Transport(_) => ErrorKind::ServiceUnavailable,
            AuthError::Decode(_) | AuthError::Storage(_) | AuthError::Config(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to the user-presentable AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation { field, message } => {
                AppError::bad_request(message.clone()).with_field(*field)
            }
            AuthError::Unauthorized { .. } | AuthError::NotAuthenticated => {
                AppError::unauthorized(self.to_string()).with_action("Please log in again")
            }
            AuthError::Transport(_) => AppError::service_unavailable(self.to_string())
                .with_action("Check your connection and try again"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Storage(e) => {
                tracing::error!(error = %e, "Session storage error");
            }
            AuthError::Decode(e) => {
                tracing::error!(error = %e, "Undecodable API response");
            }
            AuthError::Config(e) => {
                tracing::error!(error = %e, "Client misconfigured");
            }
            AuthError::Transport(e) => {
                tracing::warn!(error = %e, "API unreachable");
            }
            AuthError::Api { status, message } if status.is_server_error() => {
                tracing::warn!(status = %status, message = %message, "API server error");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.to_app_error()
    }
}
