//! Password Recovery Use Cases
//!
//! `forgot-password` mails a reset token; `reset-password` spends it.

use std::sync::Arc;

use platform::storage::KeyValueStore;
use platform::transport::HttpTransport;

use crate::application::api_client::{ApiClient, ApiRequest};
use crate::domain::value_object::{email::Email, password::Password, reset_token::ResetToken};
use crate::error::AuthResult;
use crate::infra::dto::{ForgotPasswordRequest, ResetPasswordRequest};

/// Request a password reset email
pub struct ForgotPasswordUseCase<T, K> {
    client: Arc<ApiClient<T, K>>,
}

impl<T, K> ForgotPasswordUseCase<T, K>
where
    T: HttpTransport + Sync + 'static,
    K: KeyValueStore + 'static,
{
    pub fn new(client: Arc<ApiClient<T, K>>) -> Self {
        Self { client }
    }

    pub async fn execute(&self, email: &str) -> AuthResult<()> {
        let email = Email::new(email)?;

        let request = ApiRequest::post(
            "users/forgot-password",
            &ForgotPasswordRequest {
                email: email.as_str(),
            },
        )?;
        self.client.send(request).await?;

        tracing::info!("Password reset requested");
        Ok(())
    }
}

/// Reset password input
pub struct ResetPasswordInput {
    pub email: String,
    pub token: String,
    pub new_password: String,
}

/// Set a new password with a mailed reset token
pub struct ResetPasswordUseCase<T, K> {
    client: Arc<ApiClient<T, K>>,
}

impl<T, K> ResetPasswordUseCase<T, K>
where
    T: HttpTransport + Sync + 'static,
    K: KeyValueStore + 'static,
{
    pub fn new(client: Arc<ApiClient<T, K>>) -> Self {
        Self { client }
    }

    pub async fn execute(&self, input: ResetPasswordInput) -> AuthResult<()> {
        let email = Email::new(input.email)?;
        let token = ResetToken::new(&input.token)?;
        let new_password = Password::new(&input.new_password, "newPassword")?;

        let request = ApiRequest::post(
            "users/reset-password",
            &ResetPasswordRequest {
                email: email.as_str(),
                token: token.expose(),
                new_password: new_password.expose(),
            },
        )?;
        self.client.send(request).await?;

        tracing::info!("Password reset");
        Ok(())
    }
}
