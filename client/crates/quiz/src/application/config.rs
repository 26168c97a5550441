//! Application Configuration
//!
//! Configuration for the quiz application layer.

use std::env;
use std::fmt;
use std::str::FromStr;

use platform::config::ConfigError;

/// Environment variable selecting the timeout policy
pub const TIMEOUT_POLICY_VAR: &str = "QUIZ_TIMEOUT_POLICY";

/// What happens to the answers when the attempt timer runs out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeoutPolicy {
    /// Abandon the attempt; nothing is sent
    #[default]
    Discard,
    /// Submit the answers collected so far, once
    AutoSubmit,
}

impl FromStr for TimeoutPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard" => Ok(TimeoutPolicy::Discard),
            "auto-submit" | "auto_submit" | "autosubmit" => Ok(TimeoutPolicy::AutoSubmit),
            _ => Err(ConfigError::InvalidValue {
                var: TIMEOUT_POLICY_VAR,
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TimeoutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeoutPolicy::Discard => f.write_str("discard"),
            TimeoutPolicy::AutoSubmit => f.write_str("auto-submit"),
        }
    }
}

/// Quiz application configuration
#[derive(Debug, Clone, Default)]
pub struct QuizConfig {
    pub timeout_policy: TimeoutPolicy,
}

impl QuizConfig {
    pub fn with_policy(timeout_policy: TimeoutPolicy) -> Self {
        Self { timeout_policy }
    }

    /// Load from `QUIZ_TIMEOUT_POLICY`; unset means [`TimeoutPolicy::Discard`]
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_policy = match env::var(TIMEOUT_POLICY_VAR) {
            Ok(value) => value.parse()?,
            Err(_) => TimeoutPolicy::default(),
        };
        tracing::debug!(timeout_policy = %timeout_policy, "Loaded quiz configuration");
        Ok(Self { timeout_policy })
    }
}
