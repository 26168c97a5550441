//! Submit Attempt Use Case
//!
//! Posts the collected answers as one payload. A successful submission
//! consumes the attempt (and stops its timer); a failed one hands the attempt
//! back untouched so the user can retry.

use std::sync::Arc;

use auth::{ApiClient, ApiRequest};
use platform::storage::KeyValueStore;
use platform::transport::HttpTransport;
use serde::Deserialize;
use thiserror::Error;

use crate::application::active_attempt::ActiveAttempt;
use crate::application::config::{QuizConfig, TimeoutPolicy};
use crate::error::{QuizError, QuizResult};

/// Submit endpoint, relative to the API base URL
pub const SUBMIT_PATH: &str = "quiz-attempts/submit";

/// Whatever the server reported back; every field is optional
///
/// Any 2xx answer counts as accepted. A body that does not have this shape
/// yields the default result (or just its text as the message).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionResult {
    pub message: Option<String>,
    pub score: Option<f64>,
    pub total_questions: Option<u32>,
}

impl SubmissionResult {
    fn parse(body: &[u8]) -> Self {
        if body.trim_ascii().is_empty() {
            return Self::default();
        }
        match serde_json::from_slice(body) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "Unrecognized submission response body");
                let text = String::from_utf8_lossy(body);
                let text = text.trim().trim_matches('"');
                Self {
                    message: (!text.is_empty()).then(|| text.to_string()),
                    ..Self::default()
                }
            }
        }
    }
}

/// A submission that did not go through; the attempt is returned intact
#[derive(Debug, Error)]
#[error("Submission failed: {error}")]
pub struct SubmitRejected {
    pub attempt: ActiveAttempt,
    #[source]
    pub error: QuizError,
}

/// What the timeout policy did with an expired attempt
#[derive(Debug, Clone, PartialEq)]
pub enum TimeoutOutcome {
    Discarded,
    Submitted(SubmissionResult),
}

pub struct SubmitAttemptUseCase<T, K> {
    client: Arc<ApiClient<T, K>>,
    config: Arc<QuizConfig>,
}

impl<T, K> SubmitAttemptUseCase<T, K>
where
    T: HttpTransport + Sync + 'static,
    K: KeyValueStore + 'static,
{
    pub fn new(client: Arc<ApiClient<T, K>>, config: Arc<QuizConfig>) -> Self {
        Self { client, config }
    }

    /// Submit on the user's request
    ///
    /// Under [`TimeoutPolicy::Discard`] an expired attempt is rejected
    /// without contacting the server.
    pub async fn execute(&self, attempt: ActiveAttempt) -> Result<SubmissionResult, SubmitRejected> {
        if attempt.is_expired() && self.config.timeout_policy == TimeoutPolicy::Discard {
            return Err(SubmitRejected {
                attempt,
                error: QuizError::AttemptExpired,
            });
        }
        self.submit(attempt).await
    }

    /// Apply the timeout policy to an attempt whose timer fired
    pub async fn handle_timeout(
        &self,
        attempt: ActiveAttempt,
    ) -> Result<TimeoutOutcome, SubmitRejected> {
        match self.config.timeout_policy {
            TimeoutPolicy::Discard => {
                tracing::info!(
                    attempt_id = %attempt.attempt().id(),
                    answered = attempt.attempt().answered_count(),
                    "Attempt timed out; answers discarded"
                );
                Ok(TimeoutOutcome::Discarded)
            }
            TimeoutPolicy::AutoSubmit => {
                tracing::info!(
                    attempt_id = %attempt.attempt().id(),
                    "Attempt timed out; submitting collected answers"
                );
                self.submit(attempt).await.map(TimeoutOutcome::Submitted)
            }
        }
    }

    async fn submit(&self, attempt: ActiveAttempt) -> Result<SubmissionResult, SubmitRejected> {
        match self.post(&attempt).await {
            Ok(result) => {
                let (attempt, _timer) = attempt.into_parts();
                tracing::info!(
                    attempt_id = %attempt.id(),
                    quiz_id = %attempt.quiz_id(),
                    answers = attempt.answered_count(),
                    "Quiz attempt submitted"
                );
                Ok(result)
            }
            Err(error) => {
                error.log();
                Err(SubmitRejected { attempt, error })
            }
        }
    }

    async fn post(&self, attempt: &ActiveAttempt) -> QuizResult<SubmissionResult> {
        let submission = attempt.attempt().submission();
        let request = ApiRequest::post(SUBMIT_PATH, &submission)?.authenticated();
        let response = self.client.send(request).await?;
        Ok(SubmissionResult::parse(&response.body))
    }
}
