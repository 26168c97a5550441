//! Quiz Catalogue
//!
//! Lists quizzes and loads a single quiz.

use std::sync::Arc;

use auth::{ApiClient, ApiRequest};
use kernel::id::QuizId;
use platform::storage::KeyValueStore;
use platform::transport::HttpTransport;

use crate::domain::entity::quiz::Quiz;
use crate::error::QuizResult;
use crate::infra::dto::QuizDto;

pub struct QuizCatalog<T, K> {
    client: Arc<ApiClient<T, K>>,
}

impl<T, K> QuizCatalog<T, K>
where
    T: HttpTransport + Sync + 'static,
    K: KeyValueStore + 'static,
{
    pub fn new(client: Arc<ApiClient<T, K>>) -> Self {
        Self { client }
    }

    /// `GET quizzes/`
    pub async fn list(&self) -> QuizResult<Vec<Quiz>> {
        let quizzes: Vec<QuizDto> = self
            .client
            .call(ApiRequest::get("quizzes/").authenticated())
            .await?;

        tracing::debug!(count = quizzes.len(), "Fetched quizzes");
        Ok(quizzes.into_iter().map(Quiz::from).collect())
    }

    /// `GET quizzes/:id`
    pub async fn get(&self, id: &QuizId) -> QuizResult<Quiz> {
        let quiz: QuizDto = self
            .client
            .call(ApiRequest::get(format!("quizzes/{id}")).authenticated())
            .await?;

        Ok(Quiz::from(quiz))
    }
}
