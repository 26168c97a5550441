//! Scenario tests for the quiz crate
//! Start, answer, time out and submit against a scripted API

use std::sync::{Arc, Mutex};
use std::time::Duration;

use auth::{ApiClient, SessionStore};
use http::{Method, StatusCode};
use kernel::id::QuizId;
use platform::config::ClientConfig;
use platform::storage::MemoryStore;
use platform::testing::{ScriptedTransport, ok_json, status};
use platform::transport::{HttpRequest, HttpResponse, TransportError};
use serde_json::{Value, json};
use tokio_test::assert_ok;

use crate::application::{
    QuizCatalog, ResultsUseCase, StartAttemptUseCase, SubmitAttemptUseCase, TimeoutOutcome,
};
use crate::{QuizConfig, QuizError, TimeoutPolicy, TimerState};

const BASE_URL: &str = "http://localhost:5000/api/";

type Client = ApiClient<ScriptedTransport, MemoryStore>;

fn client(transport: &ScriptedTransport) -> Arc<Client> {
    let session = Arc::new(SessionStore::restore(MemoryStore::new()).unwrap());
    session
        .login("a1".into(), "r1".into(), "u1".into())
        .unwrap();
    let config = Arc::new(ClientConfig::new(BASE_URL).unwrap());
    Arc::new(ApiClient::new(Arc::new(transport.clone()), session, config).unwrap())
}

fn started(duration_minutes: i64) -> Value {
    json!({
        "savedQuizAttempt": { "_id": "att1", "duration": duration_minutes },
        "questions": [
            { "_id": "q1", "quizId": "quiz1", "questionText": "2 + 2", "options": ["3", "4"], "questionType": "MCQ" },
            { "_id": "q2", "quizId": "quiz1", "questionText": "Rust is GC'd", "options": ["True", "False"], "questionType": "TRUE_FALSE" },
            { "_id": "q3", "quizId": "quiz1", "questionText": "1 + 1", "options": ["1", "2"], "questionType": "MCQ" }
        ]
    })
}

/// Quiz API that records submitted payloads
fn quiz_api(
    duration_minutes: i64,
    submit_status: StatusCode,
) -> (ScriptedTransport, Arc<Mutex<Vec<Value>>>) {
    let submitted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&submitted);

    let transport = ScriptedTransport::new(move |request: &HttpRequest| {
        match (&request.method, request.url.path()) {
            (&Method::POST, "/api/quiz-attempts/") => ok_json(started(duration_minutes)),
            (&Method::POST, "/api/quiz-attempts/submit") => {
                let body: Value =
                    serde_json::from_slice(request.body.as_deref().unwrap_or_default()).unwrap();
                sink.lock().unwrap().push(body);
                if submit_status.is_success() {
                    ok_json(json!({ "message": "Quiz submitted", "score": 2, "totalQuestions": 3 }))
                } else {
                    status(submit_status)
                }
            }
            _ => status(StatusCode::NOT_FOUND),
        }
    });
    (transport, submitted)
}

mod attempt_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_start_seeds_timer_from_minutes() {
        let (transport, _) = quiz_api(2, StatusCode::OK);
        let client = client(&transport);

        let attempt = StartAttemptUseCase::new(Arc::clone(&client))
            .execute(&QuizId::new("quiz1"))
            .await
            .unwrap();

        assert_eq!(attempt.attempt().duration_seconds(), 120);
        assert_eq!(attempt.remaining_seconds(), 120);
        assert_eq!(attempt.attempt().questions().len(), 3);

        let request = &transport.requests()[0];
        assert_eq!(request.bearer_token(), Some("a1"));
        let body: Value = serde_json::from_slice(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "userId": "u1", "quizId": "quiz1" }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_requires_a_user() {
        let (transport, _) = quiz_api(2, StatusCode::OK);
        let client = client(&transport);
        client.session().logout().unwrap();

        let err = StartAttemptUseCase::new(Arc::clone(&client))
            .execute(&QuizId::new("quiz1"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), kernel::error::kind::ErrorKind::Unauthorized);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_attempt_is_expired_at_start() {
        let (transport, _) = quiz_api(0, StatusCode::OK);
        let client = client(&transport);

        let mut attempt = StartAttemptUseCase::new(Arc::clone(&client))
            .execute(&QuizId::new("quiz1"))
            .await
            .unwrap();

        assert!(attempt.is_expired());
        assert!(attempt.timer_mut().expired().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_covers_every_answered_question() {
        let (transport, submitted) = quiz_api(5, StatusCode::OK);
        let client = client(&transport);
        let config = Arc::new(QuizConfig::default());

        let mut attempt = StartAttemptUseCase::new(Arc::clone(&client))
            .execute(&QuizId::new("quiz1"))
            .await
            .unwrap();
        attempt.select(&"q1".into(), "4").unwrap();
        attempt.select(&"q2".into(), "False").unwrap();
        attempt.select(&"q3".into(), "2").unwrap();
        let mut remaining = attempt.timer().watch_remaining();

        let result = SubmitAttemptUseCase::new(Arc::clone(&client), config)
            .execute(attempt)
            .await
            .unwrap();

        assert_eq!(result.score, Some(2.0));
        let payloads = submitted.lock().unwrap().clone();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0]["quizAttemptId"], "att1");
        assert_eq!(payloads[0]["answers"].as_array().unwrap().len(), 3);
        // The timer went away with the consumed attempt.
        assert!(remaining.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_any_success_status_consumes_the_attempt() {
        let bodies = [
            HttpResponse::new(StatusCode::OK, "Quiz submitted successfully"),
            HttpResponse::json(StatusCode::OK, &json!({ "score": 66.7 })),
            HttpResponse::new(StatusCode::CREATED, Vec::new()),
        ];

        for reply in bodies {
            let transport = ScriptedTransport::new(move |request: &HttpRequest| {
                match request.url.path() {
                    "/api/quiz-attempts/" => ok_json(started(5)),
                    _ => Ok(reply.clone()),
                }
            });
            let client = client(&transport);

            let mut attempt = StartAttemptUseCase::new(Arc::clone(&client))
                .execute(&QuizId::new("quiz1"))
                .await
                .unwrap();
            attempt.select(&"q1".into(), "4").unwrap();
            let mut remaining = attempt.timer().watch_remaining();

            let result = SubmitAttemptUseCase::new(Arc::clone(&client), Arc::new(QuizConfig::default()))
                .execute(attempt)
                .await;

            assert_ok!(result);
            assert_eq!(transport.count(Method::POST, "/quiz-attempts/submit"), 1);
            assert!(remaining.changed().await.is_err());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_submission_returns_the_attempt() {
        let (transport, submitted) = quiz_api(5, StatusCode::INTERNAL_SERVER_ERROR);
        let client = client(&transport);
        let submit = SubmitAttemptUseCase::new(Arc::clone(&client), Arc::new(QuizConfig::default()));

        let mut attempt = StartAttemptUseCase::new(Arc::clone(&client))
            .execute(&QuizId::new("quiz1"))
            .await
            .unwrap();
        attempt.select(&"q1".into(), "4").unwrap();

        let rejected = submit.execute(attempt).await.unwrap_err();

        assert_eq!(
            rejected.error.kind(),
            kernel::error::kind::ErrorKind::InternalServerError
        );
        let attempt = rejected.attempt;
        assert_eq!(attempt.attempt().answer(&"q1".into()), Some("4"));
        assert!(matches!(attempt.timer().state(), TimerState::Running { .. }));
        assert_eq!(submitted.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_attempt_is_discarded_by_default() {
        let (transport, submitted) = quiz_api(1, StatusCode::OK);
        let client = client(&transport);
        let submit = SubmitAttemptUseCase::new(Arc::clone(&client), Arc::new(QuizConfig::default()));

        let mut attempt = StartAttemptUseCase::new(Arc::clone(&client))
            .execute(&QuizId::new("quiz1"))
            .await
            .unwrap();
        attempt.select(&"q1".into(), "4").unwrap();

        assert!(attempt.timer_mut().expired().await);
        assert_eq!(attempt.remaining_seconds(), 0);

        let rejected = submit.execute(attempt).await.unwrap_err();
        assert!(matches!(rejected.error, QuizError::AttemptExpired));

        let outcome = submit.handle_timeout(rejected.attempt).await.unwrap();
        assert_eq!(outcome, TimeoutOutcome::Discarded);
        assert!(submitted.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_submit_sends_collected_answers_once() {
        let (transport, submitted) = quiz_api(1, StatusCode::OK);
        let client = client(&transport);
        let config = Arc::new(QuizConfig::with_policy(TimeoutPolicy::AutoSubmit));
        let submit = SubmitAttemptUseCase::new(Arc::clone(&client), config);

        let mut attempt = StartAttemptUseCase::new(Arc::clone(&client))
            .execute(&QuizId::new("quiz1"))
            .await
            .unwrap();
        attempt.select(&"q2".into(), "True").unwrap();

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert!(attempt.is_expired());

        let outcome = assert_ok!(submit.handle_timeout(attempt).await);
        assert!(matches!(outcome, TimeoutOutcome::Submitted(_)));

        let payloads = submitted.lock().unwrap().clone();
        assert_eq!(payloads.len(), 1);
        assert_eq!(
            payloads[0]["answers"],
            json!([{ "questionId": "q2", "selectedOption": "True" }])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_expiry_wins_select_against_idle_input() {
        let (transport, _) = quiz_api(1, StatusCode::OK);
        let client = client(&transport);
        let mut attempt = StartAttemptUseCase::new(Arc::clone(&client))
            .execute(&QuizId::new("quiz1"))
            .await
            .unwrap();

        let expired = tokio::select! {
            fired = attempt.timer_mut().expired() => fired,
            _ = std::future::pending::<()>() => false,
        };

        assert!(expired);
        assert!(attempt.is_expired());
    }
}

mod catalog_tests {
    use super::*;

    fn catalog_api(request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        match request.url.path() {
            "/api/quizzes/" => ok_json(json!([
                { "_id": "quiz1", "title": "Rust basics", "description": "Ownership", "duration": 10, "questions": ["q1", "q2"], "isActive": true },
                { "_id": "quiz2", "title": "Async Rust", "description": "Futures", "duration": 15, "questions": [], "isActive": false }
            ])),
            "/api/quizzes/quiz1" => ok_json(json!({
                "_id": "quiz1", "title": "Rust basics", "duration": 10,
                "questions": [{ "_id": "q1", "questionText": "?", "options": ["a", "b"], "questionType": "MCQ" }]
            })),
            "/api/results/user/u1" => ok_json(json!([
                { "_id": "r1", "quizId": { "title": "Rust basics", "duration": 10 }, "score": 4, "totalQuestions": 5, "createdAt": "2024-05-01T10:00:00.000Z" }
            ])),
            _ => Ok(HttpResponse::json(
                StatusCode::NOT_FOUND,
                &json!({ "message": "Quiz not found" }),
            )),
        }
    }

    #[tokio::test]
    async fn test_list_and_get() {
        let transport = ScriptedTransport::new(catalog_api);
        let catalog = QuizCatalog::new(client(&transport));

        let quizzes = catalog.list().await.unwrap();
        assert_eq!(quizzes.len(), 2);
        assert_eq!(quizzes[0].question_count, 2);
        assert!(!quizzes[1].is_active);

        let quiz = catalog.get(&QuizId::new("quiz1")).await.unwrap();
        assert_eq!(quiz.questions.len(), 1);
        assert!(transport.requests().iter().all(|r| r.bearer_token() == Some("a1")));
    }

    #[tokio::test]
    async fn test_missing_quiz_keeps_server_message() {
        let transport = ScriptedTransport::new(catalog_api);
        let catalog = QuizCatalog::new(client(&transport));

        let err = catalog.get(&QuizId::new("nope")).await.unwrap_err();
        let app = err.to_app_error();
        assert_eq!(app.kind(), kernel::error::kind::ErrorKind::NotFound);
        assert!(app.message().contains("Quiz not found"));
    }

    #[tokio::test]
    async fn test_results_for_current_user() {
        let transport = ScriptedTransport::new(catalog_api);
        let results = ResultsUseCase::new(client(&transport))
            .for_current_user()
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].quiz_title.as_deref(), Some("Rust basics"));
        assert_eq!(results[0].score, 4);
        assert_eq!(results[0].total_questions, 5);
    }
}
