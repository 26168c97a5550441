//! Secret Strings
//!
//! Tokens and passwords are held in [`SecretString`]:
//! - memory is zeroized when the value is dropped
//! - `Debug` output is redacted, so secrets never reach the logs

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// String that is wiped from memory on drop and never printed
///
/// Unlike a clear text password, access and refresh tokens are cloned into
/// every Session snapshot, so this type is `Clone`; each copy zeroizes itself.
///
/// ## Examples
/// ```rust
/// use platform::secret::SecretString;
///
/// let token = SecretString::new("eyJhbGciOi...");
/// assert_eq!(format!("{token:?}"), "SecretString([REDACTED])");
/// assert_eq!(token.expose(), "eyJhbGciOi...");
/// ```
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a secret received from the API or read from storage
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the secret value
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Number of Unicode code points (not bytes)
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value)
    }
}
