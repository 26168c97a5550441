//! HTTP Transport
//!
//! The single seam between the client and the network. Higher layers build
//! fully resolved [`HttpRequest`]s and never talk to `reqwest` directly, so
//! tests can swap in a scripted transport.

use http::header::{self, HeaderMap, HeaderValue};
use http::{Method, StatusCode};
use reqwest::Url;
use thiserror::Error;

/// Transport-level failure (no HTTP response was obtained)
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid header value for {name}")]
    InvalidHeader { name: &'static str },

    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

/// Outgoing request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(method: Method, url: Url) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            method,
            url,
            headers,
            body: None,
        }
    }

    /// Attach a JSON body
    pub fn with_json_body(mut self, body: Vec<u8>) -> Self {
        self.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        self.body = Some(body);
        self
    }

    /// Set `Authorization: Bearer <token>`, replacing any previous credential
    pub fn with_bearer(mut self, token: &str) -> Result<Self, TransportError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            TransportError::InvalidHeader {
                name: "authorization",
            }
        })?;
        value.set_sensitive(true);
        self.headers.insert(header::AUTHORIZATION, value);
        Ok(self)
    }

    /// The bearer token carried by this request, if any
    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
    }
}

/// Response as received from the server
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Response with a JSON body
    pub fn json(status: StatusCode, body: &serde_json::Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The `message` field of a JSON error body, if the server sent one
    pub fn error_message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        value
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
    }
}

/// Sends one request and returns whatever the server answered
///
/// Implementations must not interpret status codes; a 401 is a successful
/// transport round trip.
#[trait_variant::make(HttpTransport: Send)]
pub trait LocalHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `reqwest`-backed transport
///
/// No timeout is configured here; the client relies on `reqwest` defaults.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("http://localhost:5000/api/quizzes/").unwrap()
    }

    #[test]
    fn test_bearer_roundtrip() {
        let request = HttpRequest::new(Method::GET, url())
            .with_bearer("abc")
            .unwrap();
        assert_eq!(request.bearer_token(), Some("abc"));
        assert!(request.headers[header::AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn test_bearer_replaces_previous_token() {
        let request = HttpRequest::new(Method::GET, url())
            .with_bearer("old")
            .unwrap()
            .with_bearer("new")
            .unwrap();
        assert_eq!(request.bearer_token(), Some("new"));
        assert_eq!(request.headers.get_all(header::AUTHORIZATION).iter().count(), 1);
    }

    #[test]
    fn test_bearer_rejects_header_injection() {
        let result = HttpRequest::new(Method::GET, url()).with_bearer("a\r\nX-Evil: 1");
        assert!(matches!(result, Err(TransportError::InvalidHeader { .. })));
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = HttpRequest::new(Method::POST, url()).with_json_body(b"{}".to_vec());
        assert_eq!(request.headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(request.body.as_deref(), Some(&b"{}"[..]));
    }

    #[test]
    fn test_error_message_extraction() {
        let response = HttpResponse::json(
            StatusCode::BAD_REQUEST,
            &serde_json::json!({ "message": "Email already registered" }),
        );
        assert_eq!(
            response.error_message().as_deref(),
            Some("Email already registered")
        );

        let plain = HttpResponse::new(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(plain.error_message(), None);
    }
}
