//! Infrastructure Layer
//!
//! JSON shapes exchanged with the quiz endpoints.

pub mod dto;
