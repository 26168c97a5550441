//! Email Value Object
//!
//! Validated email address for login, sign-up and password recovery forms.
//! Basic format validation only; the server owns real verification.

use derive_more::Display;
use serde::Serialize;
use std::str::FromStr;

use crate::error::{AuthError, AuthResult};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation (trimmed and lowercased)
    pub fn new(email: impl Into<String>) -> AuthResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(AuthError::validation("email", "Email is required"));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AuthError::validation(
                "email",
                format!("Email must be at most {} characters", EMAIL_MAX_LENGTH),
            ));
        }

        if !Self::is_valid_format(&email) {
            return Err(AuthError::validation("email", "Invalid email address"));
        }

        Ok(Self(email))
    }

    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || local.len() > 64 || domain.contains('@') {
            return false;
        }

        if domain.is_empty() || !domain.contains('.') {
            return false;
        }

        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }

        !(domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = AuthError;

    fn from_str(s: &str) -> AuthResult<Self> {
        Email::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("user.name@example.co.jp").is_ok());
        assert!(Email::new("user+tag@example.com").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert!(Email::new("").is_err());
        assert!(Email::new("userexample.com").is_err());
        assert!(Email::new("user@").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("user@@example.com").is_err());
        assert!(Email::new("user@example").is_err());
        assert!(Email::new("user@-example.com").is_err());
    }

    #[test]
    fn test_email_normalization() {
        let email: Email = "  User@Example.COM ".parse().unwrap();
        assert_eq!(email.as_str(), "user@example.com");
        assert_eq!(email.to_string(), "user@example.com");
    }

    #[test]
    fn test_email_error_targets_field() {
        match Email::new("nope") {
            Err(AuthError::Validation { field, .. }) => assert_eq!(field, "email"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
