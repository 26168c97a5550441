//! Quiz Error Types
//!
//! Quiz-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use auth::AuthError;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Quiz-specific result type alias
pub type QuizResult<T> = Result<T, QuizError>;

/// Quiz-specific error variants
#[derive(Debug, Error)]
pub enum QuizError {
    /// Request, session or validation failure from the auth layer
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Question {question_id} is not part of this attempt")]
    UnknownQuestion { question_id: String },

    #[error("{option:?} is not an option of question {question_id}")]
    InvalidOption { question_id: String, option: String },

    /// The attempt timer ran out; the answers were not sent
    #[error("Time is up for this attempt")]
    AttemptExpired,
}

impl QuizError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuizError::Auth(e) => e.kind(),
            QuizError::UnknownQuestion { .. } | QuizError::InvalidOption { .. } => {
                ErrorKind::BadRequest
            }
            QuizError::AttemptExpired => ErrorKind::Gone,
        }
    }

    /// Convert to the user-presentable AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            QuizError::Auth(e) => e.to_app_error(),
            QuizError::AttemptExpired => {
                AppError::gone(self.to_string()).with_action("Start the quiz again")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            QuizError::Auth(e) => e.log(),
            QuizError::AttemptExpired => {
                tracing::info!("Attempt expired before submission");
            }
            _ => {
                tracing::debug!(error = %self, "Quiz error");
            }
        }
    }
}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        err.to_app_error()
    }
}
