//! Password Value Object
//!
//! Password typed into the login, sign-up or reset form. Held as a
//! zeroizing secret and sent exactly as typed.

use platform::secret::SecretString;

use crate::error::{AuthError, AuthResult};

/// Minimum password length accepted by the account forms
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Raw password from user input
#[derive(Debug)]
pub struct Password(SecretString);

impl Password {
    /// Validate a password for the form field `field`
    /// (`password` or `newPassword`)
    pub fn new(raw: &str, field: &'static str) -> AuthResult<Self> {
        let secret = SecretString::new(raw);

        if secret.expose().trim().is_empty() {
            return Err(AuthError::validation(field, "Password is required"));
        }

        let count = secret.char_count();
        if count < MIN_PASSWORD_LENGTH {
            return Err(AuthError::validation(
                field,
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            ));
        }
        if count > MAX_PASSWORD_LENGTH {
            return Err(AuthError::validation(
                field,
                format!("Password must be at most {MAX_PASSWORD_LENGTH} characters"),
            ));
        }

        Ok(Self(secret))
    }

    pub fn expose(&self) -> &str {
        self.0.expose()
    }
}
