//! Logout Use Case
//!
//! Clears the local session. The API keeps no server-side session to end.

use std::sync::Arc;

use platform::storage::KeyValueStore;

use crate::error::AuthResult;
use crate::infra::session_store::SessionStore;

/// Logout use case
pub struct LogoutUseCase<K> {
    session: Arc<SessionStore<K>>,
}

impl<K: KeyValueStore> LogoutUseCase<K> {
    pub fn new(session: Arc<SessionStore<K>>) -> Self {
        Self { session }
    }

    pub fn execute(&self) -> AuthResult<()> {
        let user_id = self.session.get().user_id().cloned();
        self.session.logout()?;

        match user_id {
            Some(user_id) => tracing::info!(user_id = %user_id, "User logged out"),
            None => tracing::info!("Session cleared"),
        }
        Ok(())
    }
}
