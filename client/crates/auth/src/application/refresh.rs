//! Refresh Coordinator
//!
//! Exchanges the refresh token for a new access token. At most one exchange
//! is in flight at a time: callers that hit a 401 while an exchange is
//! running wait for its outcome instead of starting their own.
//!
//! The exchange runs on its own task, so it completes (and publishes its
//! outcome) even if the caller that started it is dropped.

use std::sync::{Arc, Mutex, MutexGuard};

use http::Method;
use platform::config::ClientConfig;
use platform::secret::SecretString;
use platform::storage::KeyValueStore;
use platform::transport::{HttpRequest, HttpTransport};
use tokio::sync::watch;
use url::Url;

use crate::application::api_client::check_status;
use crate::domain::session::TokenPair;
use crate::error::AuthResult;
use crate::infra::dto::{RefreshRequest, RefreshResponse};
use crate::infra::session_store::SessionStore;

/// Refresh endpoint, relative to the API base URL
pub const REFRESH_PATH: &str = "users/refresh-token";

/// Result of a refresh, shared by every caller that waited on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub success: bool,
    pub access_token: Option<SecretString>,
    pub refresh_token: Option<SecretString>,
}

impl RefreshOutcome {
    pub fn failed() -> Self {
        Self {
            success: false,
            access_token: None,
            refresh_token: None,
        }
    }

    fn refreshed(tokens: &TokenPair) -> Self {
        Self {
            success: true,
            access_token: Some(tokens.access_token.clone()),
            refresh_token: Some(tokens.refresh_token.clone()),
        }
    }

    /// The access token to retry with, if the refresh succeeded
    pub fn access_token(&self) -> Option<&SecretString> {
        self.access_token.as_ref().filter(|_| self.success)
    }
}

type InFlight = watch::Receiver<Option<RefreshOutcome>>;

/// Single-flight refresh of the session's access token
pub struct RefreshCoordinator<T, K> {
    transport: Arc<T>,
    session: Arc<SessionStore<K>>,
    endpoint: Url,
    in_flight: Arc<Mutex<Option<InFlight>>>,
}

impl<T, K> Clone for RefreshCoordinator<T, K> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            session: Arc::clone(&self.session),
            endpoint: self.endpoint.clone(),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<T, K> RefreshCoordinator<T, K>
where
    T: HttpTransport + Sync + 'static,
    K: KeyValueStore + 'static,
{
    pub fn new(
        transport: Arc<T>,
        session: Arc<SessionStore<K>>,
        config: &ClientConfig,
    ) -> AuthResult<Self> {
        Ok(Self {
            transport,
            session,
            endpoint: config.endpoint(REFRESH_PATH)?,
            in_flight: Arc::new(Mutex::new(None)),
        })
    }

    /// Obtain a fresh access token to replace `stale`
    ///
    /// Joins the running exchange if there is one. If the session already
    /// holds a different access token, that token is returned without a
    /// network call.
    pub async fn refresh(&self, stale: Option<&str>) -> RefreshOutcome {
        let mut rx = {
            let mut slot = self.lock();
            match slot.as_ref() {
                Some(running) => running.clone(),
                None => {
                    let session = self.session.get();
                    if let Some(tokens) = session.tokens_newer_than(stale) {
                        return RefreshOutcome::refreshed(tokens);
                    }
                    let rx = self.start_exchange();
                    *slot = Some(rx.clone());
                    rx
                }
            }
        };

        let outcome = match rx.wait_for(Option::is_some).await {
            Ok(value) => (*value).clone(),
            Err(_) => None,
        };
        outcome.unwrap_or_else(RefreshOutcome::failed)
    }

    fn start_exchange(&self) -> InFlight {
        let (tx, rx) = watch::channel(None);
        let this = self.clone();

        tokio::spawn(async move {
            let outcome = this.exchange().await;
            // Clear before publishing: a caller arriving afterwards must see
            // the updated session rather than join a finished exchange.
            this.lock().take();
            tx.send_replace(Some(outcome));
        });

        rx
    }

    async fn exchange(&self) -> RefreshOutcome {
        let Some(refresh_token) = self.session.get().refresh_token().cloned() else {
            tracing::warn!("No refresh token available; clearing session");
            self.clear_session();
            return RefreshOutcome::failed();
        };

        let response = match self.request_tokens(&refresh_token).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh rejected; clearing session");
                self.clear_session();
                return RefreshOutcome::failed();
            }
        };

        let tokens = TokenPair {
            access_token: SecretString::from(response.access_token),
            refresh_token: response
                .refresh_token
                .map(SecretString::from)
                .unwrap_or_else(|| refresh_token.clone()),
        };

        match self.session.replace_tokens(
            &refresh_token,
            tokens.access_token.clone(),
            tokens.refresh_token.clone(),
        ) {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!("Session changed during token refresh; new tokens discarded");
                return RefreshOutcome::failed();
            }
            Err(e) => {
                e.log();
                self.clear_session();
                return RefreshOutcome::failed();
            }
        }

        tracing::info!("Access token refreshed");
        RefreshOutcome::refreshed(&tokens)
    }

    async fn request_tokens(&self, refresh_token: &SecretString) -> AuthResult<RefreshResponse> {
        let body = serde_json::to_vec(&RefreshRequest {
            refresh_token: refresh_token.expose(),
        })?;
        let request = HttpRequest::new(Method::POST, self.endpoint.clone()).with_json_body(body);

        let response = check_status(self.transport.send(request).await?)?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    fn clear_session(&self) {
        if let Err(e) = self.session.logout() {
            e.log();
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<InFlight>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
