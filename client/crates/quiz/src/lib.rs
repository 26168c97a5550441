//! Quiz Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Quiz, Question and QuizAttempt entities, the Countdown state machine
//! - `application/` - Attempt timer, catalogue, start/submit use cases, results
//! - `infra/` - Wire DTOs for the quiz endpoints
//!
//! ## Attempt Lifecycle
//! - Starting a quiz creates a server-side attempt and seeds a one-second countdown
//! - Answers are collected locally and submitted as one payload
//! - A successful submission consumes the attempt and stops its timer
//! - On expiry the attempt is discarded or auto-submitted per [`TimeoutPolicy`]

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::active_attempt::ActiveAttempt;
pub use application::attempt_timer::{AttemptTimer, TimerHandle};
pub use application::config::{QuizConfig, TimeoutPolicy};
pub use domain::attempt::QuizAttempt;
pub use domain::countdown::{Countdown, Tick, TimerState};
pub use error::{QuizError, QuizResult};

#[cfg(test)]
mod tests;
