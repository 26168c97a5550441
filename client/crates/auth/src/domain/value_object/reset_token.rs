//! Password reset token from the recovery email link

use platform::secret::SecretString;

use crate::error::{AuthError, AuthResult};

#[derive(Debug)]
pub struct ResetToken(SecretString);

impl ResetToken {
    pub fn new(raw: &str) -> AuthResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AuthError::validation("token", "Token is required"));
        }
        Ok(Self(SecretString::new(trimmed)))
    }

    pub fn expose(&self) -> &str {
        self.0.expose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_required() {
        assert!(ResetToken::new("  ").is_err());
        assert_eq!(ResetToken::new(" abc ").unwrap().expose(), "abc");
    }
}
