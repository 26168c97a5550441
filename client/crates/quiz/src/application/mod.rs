//! Application Layer
//!
//! Attempt timer and quiz use cases.

pub mod active_attempt;
pub mod attempt_timer;
pub mod catalog;
pub mod config;
pub mod results;
pub mod start_attempt;
pub mod submit_attempt;

// Re-exports
pub use active_attempt::ActiveAttempt;
pub use attempt_timer::{AttemptTimer, TimerHandle};
pub use catalog::QuizCatalog;
pub use config::{QuizConfig, TimeoutPolicy};
pub use results::ResultsUseCase;
pub use start_attempt::StartAttemptUseCase;
pub use submit_attempt::{SubmissionResult, SubmitAttemptUseCase, SubmitRejected, TimeoutOutcome};
