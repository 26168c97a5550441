//! Authenticated Request Client
//!
//! Issues one logical API request. Authenticated requests carry the current
//! access token; a 401 on them hands off to the [`RefreshCoordinator`] and
//! the request is re-issued once with the refreshed token.

use std::sync::Arc;

use http::{Method, StatusCode};
use platform::config::ClientConfig;
use platform::secret::SecretString;
use platform::storage::KeyValueStore;
use platform::transport::{HttpRequest, HttpResponse, HttpTransport};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::application::refresh::RefreshCoordinator;
use crate::error::{AuthError, AuthResult};
use crate::infra::session_store::SessionStore;

/// A request relative to the API base URL
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<Vec<u8>>,
    authenticated: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            authenticated: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` with a JSON body
    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> AuthResult<Self> {
        let mut request = Self::new(Method::POST, path);
        request.body = Some(serde_json::to_vec(body)?);
        Ok(request)
    }

    /// Carry the session's bearer token and refresh it on 401
    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

/// Request client bound to one session
pub struct ApiClient<T, K> {
    transport: Arc<T>,
    session: Arc<SessionStore<K>>,
    refresher: RefreshCoordinator<T, K>,
    config: Arc<ClientConfig>,
}

impl<T, K> ApiClient<T, K>
where
    T: HttpTransport + Sync + 'static,
    K: KeyValueStore + 'static,
{
    pub fn new(
        transport: Arc<T>,
        session: Arc<SessionStore<K>>,
        config: Arc<ClientConfig>,
    ) -> AuthResult<Self> {
        let refresher =
            RefreshCoordinator::new(Arc::clone(&transport), Arc::clone(&session), &config)?;
        Ok(Self {
            transport,
            session,
            refresher,
            config,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore<K>> {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `request` and decode the 2xx body as JSON
    ///
    /// An empty body decodes as `null`, so `()` and `Option<_>` targets work
    /// for endpoints that answer without content.
    pub async fn call<R: DeserializeOwned>(&self, request: ApiRequest) -> AuthResult<R> {
        let response = self.send(request).await?;
        decode(&response.body)
    }

    /// Send `request` and return the 2xx response
    pub async fn send(&self, request: ApiRequest) -> AuthResult<HttpResponse> {
        let url = self.config.endpoint(&request.path)?;

        if !request.authenticated {
            return check_status(self.dispatch(&request, url, None).await?);
        }

        let token = self.session.get().access_token().cloned();
        let response = self.dispatch(&request, url.clone(), token.as_ref()).await?;
        if response.status != StatusCode::UNAUTHORIZED {
            return check_status(response);
        }

        let original = status_error(&response);
        tracing::debug!(path = %request.path, "Access token rejected; refreshing");

        let outcome = self
            .refresher
            .refresh(token.as_ref().map(SecretString::expose))
            .await;
        let Some(fresh) = outcome.access_token() else {
            return Err(original);
        };

        // Retried once; a second 401 is surfaced as is.
        check_status(self.dispatch(&request, url, Some(fresh)).await?)
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        url: Url,
        token: Option<&SecretString>,
    ) -> AuthResult<HttpResponse> {
        let mut http = HttpRequest::new(request.method.clone(), url);
        if let Some(body) = &request.body {
            http = http.with_json_body(body.clone());
        }
        if let Some(token) = token {
            http = http.with_bearer(token.expose())?;
        }

        tracing::debug!(method = %request.method, path = %request.path, "Sending request");
        let response = self.transport.send(http).await?;
        tracing::debug!(path = %request.path, status = %response.status, "Received response");

        Ok(response)
    }
}

/// Map a non-2xx response to an [`AuthError`]
pub(crate) fn status_error(response: &HttpResponse) -> AuthError {
    let message = response.error_message().unwrap_or_else(|| {
        response
            .status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    });

    if response.status == StatusCode::UNAUTHORIZED {
        AuthError::Unauthorized { message }
    } else {
        AuthError::Api {
            status: response.status,
            message,
        }
    }
}

/// Pass 2xx responses through, turn everything else into an error
pub(crate) fn check_status(response: HttpResponse) -> AuthResult<HttpResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(status_error(&response))
    }
}

fn decode<R: DeserializeOwned>(body: &[u8]) -> AuthResult<R> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(body)?)
}
