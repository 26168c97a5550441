//! Login Use Case
//!
//! Exchanges credentials for a token pair and stores the new session.

use std::sync::Arc;

use kernel::id::UserId;
use platform::secret::SecretString;
use platform::storage::KeyValueStore;
use platform::transport::HttpTransport;

use crate::application::api_client::{ApiClient, ApiRequest};
use crate::domain::value_object::{email::Email, password::Password};
use crate::error::AuthResult;
use crate::infra::dto::{LoginRequest, LoginResponse};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user_id: UserId,
}

/// Login use case
pub struct LoginUseCase<T, K> {
    client: Arc<ApiClient<T, K>>,
}

impl<T, K> LoginUseCase<T, K>
where
    T: HttpTransport + Sync + 'static,
    K: KeyValueStore + 'static,
{
    pub fn new(client: Arc<ApiClient<T, K>>) -> Self {
        Self { client }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(input.email)?;
        let password = Password::new(&input.password, "password")?;

        let request = ApiRequest::post(
            "users/login",
            &LoginRequest {
                email: email.as_str(),
                password: password.expose(),
            },
        )?;
        let response: LoginResponse = self.client.call(request).await?;

        let user_id = UserId::new(response.token.user_id);
        self.client.session().login(
            SecretString::from(response.token.access_token),
            SecretString::from(response.token.refresh_token),
            user_id.clone(),
        )?;

        tracing::info!(user_id = %user_id, "User logged in");

        Ok(LoginOutput { user_id })
    }
}
