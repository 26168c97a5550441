//! Sign Up Use Case
//!
//! Creates a new account. The user logs in separately afterwards.

use std::sync::Arc;

use platform::storage::KeyValueStore;
use platform::transport::HttpTransport;

use crate::application::api_client::{ApiClient, ApiRequest};
use crate::domain::value_object::{email::Email, password::Password, user_name::UserName};
use crate::error::AuthResult;
use crate::infra::dto::SignUpRequest;

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sign up use case
pub struct SignUpUseCase<T, K> {
    client: Arc<ApiClient<T, K>>,
}

impl<T, K> SignUpUseCase<T, K>
where
    T: HttpTransport + Sync + 'static,
    K: KeyValueStore + 'static,
{
    pub fn new(client: Arc<ApiClient<T, K>>) -> Self {
        Self { client }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<()> {
        let name = UserName::new(&input.name)?;
        let email = Email::new(input.email)?;
        let password = Password::new(&input.password, "password")?;

        let request = ApiRequest::post(
            "users",
            &SignUpRequest {
                name: name.as_str(),
                email: email.as_str(),
                password: password.expose(),
            },
        )?;
        self.client.send(request).await?;

        tracing::info!("User signed up");
        Ok(())
    }
}
