//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of client vocabulary:
//! - Common error types and result aliases
//! - Typed identifiers for server-issued ids (users, quizzes, questions, attempts)
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all client crates.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
