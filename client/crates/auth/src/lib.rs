//! Auth (Authentication) Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session entity and form value objects
//! - `application/` - Authenticated request client, refresh coordination, account use cases
//! - `infra/` - Persisted session store and wire DTOs
//!
//! ## Session Model
//! - Access + refresh token pair, persisted as individual storage keys
//! - Expired access tokens are refreshed transparently, once per request
//! - Concurrent 401s share a single refresh exchange
//! - A rejected refresh token clears the session

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::api_client::{ApiClient, ApiRequest};
pub use application::refresh::{RefreshCoordinator, RefreshOutcome};
pub use domain::session::Session;
pub use error::{AuthError, AuthResult};
pub use infra::session_store::SessionStore;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
