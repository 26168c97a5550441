//! Scripted transport for tests
//!
//! Answers each request through a closure and records everything it was
//! sent, so tests can assert on bearer tokens and call counts.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use http::{Method, StatusCode};

use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

type Handler = dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

/// In-memory transport driven by a handler closure
#[derive(Clone)]
pub struct ScriptedTransport {
    handler: Arc<Handler>,
    latency: Option<Duration>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new(
        handler: impl Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Arc::new(handler),
            latency: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Delay every response, so concurrent callers overlap
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    /// Number of requests whose path ends with `suffix`
    pub fn count(&self, method: Method, suffix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.url.path().ends_with(suffix))
            .count()
    }
}

impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(request.clone());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        (self.handler)(&request)
    }
}

/// `200 OK` with a JSON body
pub fn ok_json(body: serde_json::Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::json(StatusCode::OK, &body))
}

/// Empty response with the given status
pub fn status(status: StatusCode) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::new(status, Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;

    #[tokio::test]
    async fn test_records_requests_and_answers() {
        let transport = ScriptedTransport::new(|request| match request.url.path() {
            "/api/quizzes/" => ok_json(serde_json::json!([])),
            _ => status(StatusCode::NOT_FOUND),
        });

        let url = Url::parse("http://localhost/api/quizzes/").unwrap();
        let response = HttpTransport::send(&transport, HttpRequest::new(Method::GET, url))
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(transport.count(Method::GET, "/quizzes/"), 1);
        assert_eq!(transport.count(Method::POST, "/quizzes/"), 0);
    }
}
