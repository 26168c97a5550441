//! Application Layer
//!
//! Request client, refresh coordination and account use cases.

pub mod api_client;
pub mod login;
pub mod logout;
pub mod password_recovery;
pub mod refresh;
pub mod sign_up;

// Re-exports
pub use api_client::{ApiClient, ApiRequest};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use password_recovery::{ForgotPasswordUseCase, ResetPasswordInput, ResetPasswordUseCase};
pub use refresh::{RefreshCoordinator, RefreshOutcome};
pub use sign_up::{SignUpInput, SignUpUseCase};
