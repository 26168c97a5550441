//! Client Configuration
//!
//! Where the API lives and where the session is persisted. Values come from
//! the environment (a `.env` file is loaded by the binary before this runs).

use std::env;
use std::path::PathBuf;

use reqwest::Url;
use thiserror::Error;

/// Environment variable selecting the API origin
pub const BASE_URL_VAR: &str = "QUIZ_API_BASE_URL";
/// Environment variable selecting the session file
pub const SESSION_FILE_VAR: &str = "QUIZ_SESSION_FILE";

const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/";
const DEFAULT_SESSION_FILE: &str = ".quiz-session.json";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid base URL {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid endpoint path {path:?}: {source}")]
    InvalidEndpoint {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API origin; always ends with `/` so relative endpoints join under it
    pub base_url: Url,
    /// File holding the persisted session
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Build a config for an explicit base URL
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Self::parse_base_url(base_url)?,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        })
    }

    /// Load from `QUIZ_API_BASE_URL` / `QUIZ_SESSION_FILE`, falling back to
    /// defaults for unset variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;

        if let Ok(value) = env::var(SESSION_FILE_VAR) {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: SESSION_FILE_VAR,
                    value,
                });
            }
            config.session_file = PathBuf::from(value);
        }

        tracing::debug!(
            base_url = %config.base_url,
            session_file = %config.session_file.display(),
            "Loaded client configuration"
        );

        Ok(config)
    }

    /// Resolve an endpoint path such as `users/login` or `quizzes/42`
    pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| ConfigError::InvalidEndpoint {
                path: path.to_string(),
                source,
            })
    }

    fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
        let trimmed = value.trim();
        let with_slash = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
        Url::parse(&with_slash).map_err(|source| ConfigError::InvalidBaseUrl {
            value: value.to_string(),
            source,
        })
    }
}
