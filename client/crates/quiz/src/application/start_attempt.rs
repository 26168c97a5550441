//! Start Attempt Use Case
//!
//! Creates a server-side attempt for the logged-in user and starts its timer.

use std::sync::Arc;

use auth::{ApiClient, ApiRequest, AuthError};
use kernel::id::QuizId;
use platform::storage::KeyValueStore;
use platform::transport::HttpTransport;

use crate::application::active_attempt::ActiveAttempt;
use crate::application::attempt_timer::AttemptTimer;
use crate::domain::attempt::QuizAttempt;
use crate::error::QuizResult;
use crate::infra::dto::{StartAttemptRequest, StartAttemptResponse};

pub struct StartAttemptUseCase<T, K> {
    client: Arc<ApiClient<T, K>>,
}

impl<T, K> StartAttemptUseCase<T, K>
where
    T: HttpTransport + Sync + 'static,
    K: KeyValueStore + 'static,
{
    pub fn new(client: Arc<ApiClient<T, K>>) -> Self {
        Self { client }
    }

    pub async fn execute(&self, quiz_id: &QuizId) -> QuizResult<ActiveAttempt> {
        let user_id = self
            .client
            .session()
            .get()
            .user_id()
            .cloned()
            .ok_or(AuthError::NotAuthenticated)?;

        let request = ApiRequest::post(
            "quiz-attempts/",
            &StartAttemptRequest {
                user_id: &user_id,
                quiz_id,
            },
        )?
        .authenticated();
        let response: StartAttemptResponse = self.client.call(request).await?;

        let saved = response.saved_quiz_attempt;
        let duration_seconds = saved.duration.saturating_mul(60);
        let questions = response
            .questions
            .into_iter()
            .map(|q| q.into_question(quiz_id))
            .collect();
        let attempt = QuizAttempt::new(
            saved.id,
            quiz_id.clone(),
            user_id,
            duration_seconds,
            questions,
        );

        tracing::info!(
            attempt_id = %attempt.id(),
            quiz_id = %quiz_id,
            duration_seconds,
            questions = attempt.questions().len(),
            "Quiz attempt started"
        );

        let timer = AttemptTimer::start(duration_seconds);
        Ok(ActiveAttempt::new(attempt, timer))
    }
}
