//! Common ID Types
//!
//! Type-safe wrappers for the opaque string ids the quiz API issues
//! (users, quizzes, questions, attempts). The client never generates ids;
//! it only carries them back to the server.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

/// Error when building an id from untrusted input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("Id cannot be empty")]
    Empty,
}

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type QuizId = Id<markers::Quiz>;
///
/// let id: QuizId = Id::parse("65f0c1a2").unwrap();
/// assert_eq!(id.as_str(), "65f0c1a2");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Id<T> {
    value: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Wrap an id received from the API
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    /// Parse an id typed by a user (trimmed, non-empty)
    pub fn parse(value: &str) -> Result<Self, IdError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self::new(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<T> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T> From<String> for Id<T> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct User;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Quiz;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Question;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Attempt;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Result;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type QuizId = Id<markers::Quiz>;
pub type QuestionId = Id<markers::Question>;
pub type AttemptId = Id<markers::Attempt>;
pub type ResultId = Id<markers::Result>;
