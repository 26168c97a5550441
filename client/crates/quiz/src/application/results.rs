//! Results Use Case
//!
//! The logged-in user's past attempts, as shown in the results table.

use std::sync::Arc;

use auth::{ApiClient, ApiRequest, AuthError};
use platform::storage::KeyValueStore;
use platform::transport::HttpTransport;

use crate::domain::entity::result::ResultEntry;
use crate::error::QuizResult;
use crate::infra::dto::ResultDto;

pub struct ResultsUseCase<T, K> {
    client: Arc<ApiClient<T, K>>,
}

impl<T, K> ResultsUseCase<T, K>
where
    T: HttpTransport + Sync + 'static,
    K: KeyValueStore + 'static,
{
    pub fn new(client: Arc<ApiClient<T, K>>) -> Self {
        Self { client }
    }

    /// `GET results/user/:userId`
    pub async fn for_current_user(&self) -> QuizResult<Vec<ResultEntry>> {
        let user_id = self
            .client
            .session()
            .get()
            .user_id()
            .cloned()
            .ok_or(AuthError::NotAuthenticated)?;

        let results: Vec<ResultDto> = self
            .client
            .call(ApiRequest::get(format!("results/user/{user_id}")).authenticated())
            .await?;

        tracing::debug!(user_id = %user_id, count = results.len(), "Fetched results");
        Ok(results.into_iter().map(ResultEntry::from).collect())
    }
}
