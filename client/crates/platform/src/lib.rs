//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations for the quiz client:
//! - HTTP transport abstraction and the `reqwest` implementation
//! - Durable key/value storage (the client's "local storage")
//! - Environment-driven configuration
//! - Zeroizing secret strings for tokens and passwords

pub mod config;
pub mod secret;
pub mod storage;
pub mod transport;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;
