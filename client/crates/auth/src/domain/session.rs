//! Session Entity
//!
//! The authenticated state of the client. Both tokens live in one
//! [`TokenPair`], so "authenticated iff both tokens are present" holds by
//! construction.

use kernel::id::UserId;
use platform::secret::SecretString;

/// Access + refresh token pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
}

impl TokenPair {
    pub fn new(access_token: impl Into<SecretString>, refresh_token: impl Into<SecretString>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Session snapshot
///
/// Values are immutable snapshots; the session store replaces them wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    tokens: Option<TokenPair>,
    user_id: Option<UserId>,
}

impl Session {
    /// The logged-out session
    pub fn empty() -> Self {
        Self::default()
    }

    /// A logged-in session
    pub fn authenticated(tokens: TokenPair, user_id: Option<UserId>) -> Self {
        Self {
            tokens: Some(tokens),
            user_id,
        }
    }

    /// Same user, new tokens
    pub fn with_tokens(&self, tokens: TokenPair) -> Self {
        Self {
            tokens: Some(tokens),
            user_id: self.user_id.clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_some()
    }

    pub fn tokens(&self) -> Option<&TokenPair> {
        self.tokens.as_ref()
    }

    pub fn access_token(&self) -> Option<&SecretString> {
        self.tokens.as_ref().map(|t| &t.access_token)
    }

    pub fn refresh_token(&self) -> Option<&SecretString> {
        self.tokens.as_ref().map(|t| &t.refresh_token)
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Tokens that replaced `stale` since the caller read the session.
    ///
    /// Returns `None` when the session still holds `stale` (or nothing), i.e.
    /// when a refresh is still needed.
    pub fn tokens_newer_than(&self, stale: Option<&str>) -> Option<&TokenPair> {
        let tokens = self.tokens.as_ref()?;
        match stale {
            Some(stale) if tokens.access_token.expose() == stale => None,
            _ => Some(tokens),
        }
    }
}
