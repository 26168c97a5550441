//! Domain Layer
//!
//! Pure quiz model; no I/O.

pub mod attempt;
pub mod countdown;
pub mod entity;

pub use attempt::{QuizAttempt, Submission, SubmittedAnswer};
pub use countdown::{Countdown, Tick, TimerState};
pub use entity::{question::Question, question::QuestionType, quiz::Quiz, result::ResultEntry};
