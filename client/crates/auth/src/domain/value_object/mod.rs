//! Value Object Module
//!
//! Client-side form validation. Every account request is built from these
//! types, so malformed input is rejected before anything is sent.

pub mod email;
pub mod password;
pub mod reset_token;
pub mod user_name;
