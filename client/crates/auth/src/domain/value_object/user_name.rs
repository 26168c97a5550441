//! User Name Value Object
//!
//! Display name entered on the sign-up form.

use derive_more::Display;
use serde::Serialize;

use crate::error::{AuthError, AuthResult};

pub const MIN_NAME_LENGTH: usize = 3;
pub const MAX_NAME_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn new(name: &str) -> AuthResult<Self> {
        let name = name.trim();

        if name.is_empty() {
            return Err(AuthError::validation("name", "Name is required"));
        }

        let count = name.chars().count();
        if count < MIN_NAME_LENGTH {
            return Err(AuthError::validation(
                "name",
                format!("Name must be at least {MIN_NAME_LENGTH} characters"),
            ));
        }
        if count > MAX_NAME_LENGTH {
            return Err(AuthError::validation(
                "name",
                format!("Name must be at most {MAX_NAME_LENGTH} characters"),
            ));
        }
        if name.chars().any(char::is_control) {
            return Err(AuthError::validation("name", "Name contains invalid characters"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_length_counts_characters() {
        assert!(UserName::new("Al").is_err());
        assert!(UserName::new("Ali").is_ok());
        // Three characters, nine bytes
        assert!(UserName::new("太郎さ").is_ok());
    }

    #[test]
    fn test_name_is_trimmed() {
        assert_eq!(UserName::new("  Alice ").unwrap().as_str(), "Alice");
    }

    #[test]
    fn test_control_characters_rejected() {
        assert!(UserName::new("Ali\u{0007}ce").is_err());
    }
}
