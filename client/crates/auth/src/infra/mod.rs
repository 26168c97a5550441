//! Infrastructure Layer
//!
//! Session persistence and the JSON shapes exchanged with the API.

pub mod dto;
pub mod session_store;
