//! Domain Layer
//!
//! Contains the Session entity and the value objects behind the account forms.

pub mod session;
pub mod value_object;

// Re-exports
pub use session::{Session, TokenPair};
