//! Session Store
//!
//! The only owner of the [`Session`]. Every mutation is written to durable
//! storage first and then published as a whole new snapshot, so readers see
//! either the previous or the next session, never a mix.
//!
//! Storage layout: one string entry per field (`isAuthenticated`,
//! `accessToken`, `refreshToken`, `userId`).

use std::sync::{Mutex, MutexGuard};

use kernel::id::UserId;
use platform::secret::SecretString;
use platform::storage::KeyValueStore;
use tokio::sync::watch;

use crate::domain::session::{Session, TokenPair};
use crate::error::AuthResult;

pub const KEY_IS_AUTHENTICATED: &str = "isAuthenticated";
pub const KEY_ACCESS_TOKEN: &str = "accessToken";
pub const KEY_REFRESH_TOKEN: &str = "refreshToken";
pub const KEY_USER_ID: &str = "userId";

const ALL_KEYS: [&str; 4] = [
    KEY_IS_AUTHENTICATED,
    KEY_ACCESS_TOKEN,
    KEY_REFRESH_TOKEN,
    KEY_USER_ID,
];

/// Persisted, observable session holder
pub struct SessionStore<K> {
    storage: K,
    state: watch::Sender<Session>,
    // Serializes persist + publish so concurrent mutations cannot reorder.
    write_guard: Mutex<()>,
}

impl<K: KeyValueStore> SessionStore<K> {
    /// Restore the session persisted in `storage`
    ///
    /// A record missing either token restores as the empty session and its
    /// leftover keys are removed.
    pub fn restore(storage: K) -> AuthResult<Self> {
        let access = storage.get(KEY_ACCESS_TOKEN)?;
        let refresh = storage.get(KEY_REFRESH_TOKEN)?;
        let user_id = storage.get(KEY_USER_ID)?;

        let session = match (access, refresh) {
            (Some(access), Some(refresh)) => Session::authenticated(
                TokenPair::new(access, refresh),
                user_id.map(UserId::new),
            ),
            (None, None) => {
                if user_id.is_some() || storage.get(KEY_IS_AUTHENTICATED)?.is_some() {
                    storage.remove_many(&ALL_KEYS)?;
                }
                Session::empty()
            }
            _ => {
                tracing::warn!("Persisted session is missing a token; starting logged out");
                storage.remove_many(&ALL_KEYS)?;
                Session::empty()
            }
        };

        tracing::debug!(
            authenticated = session.is_authenticated(),
            "Restored session"
        );

        Ok(Self {
            storage,
            state: watch::Sender::new(session),
            write_guard: Mutex::new(()),
        })
    }

    /// Current session snapshot
    pub fn get(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Observe session changes (login, refresh, logout)
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Replace the whole session after a successful login
    pub fn login(
        &self,
        access_token: SecretString,
        refresh_token: SecretString,
        user_id: UserId,
    ) -> AuthResult<()> {
        let _guard = self.lock();

        self.storage.set_many(&[
            (KEY_IS_AUTHENTICATED, "true"),
            (KEY_ACCESS_TOKEN, access_token.expose()),
            (KEY_REFRESH_TOKEN, refresh_token.expose()),
            (KEY_USER_ID, user_id.as_str()),
        ])?;

        self.state.send_replace(Session::authenticated(
            TokenPair {
                access_token,
                refresh_token,
            },
            Some(user_id),
        ));
        Ok(())
    }

    /// Replace the tokens after a successful refresh; the user is kept
    pub fn set_tokens(
        &self,
        access_token: SecretString,
        refresh_token: SecretString,
    ) -> AuthResult<()> {
        let _guard = self.lock();
        self.write_tokens(access_token, refresh_token)
    }

    /// Replace the tokens only while the session still holds `expected_refresh`
    ///
    /// Returns `false` without writing anything when a logout or another
    /// login replaced the session since `expected_refresh` was read.
    pub fn replace_tokens(
        &self,
        expected_refresh: &SecretString,
        access_token: SecretString,
        refresh_token: SecretString,
    ) -> AuthResult<bool> {
        let _guard = self.lock();

        if self.state.borrow().refresh_token() != Some(expected_refresh) {
            return Ok(false);
        }
        self.write_tokens(access_token, refresh_token)?;
        Ok(true)
    }

    /// Clear the session
    ///
    /// The in-memory session is always cleared; a storage failure is still
    /// reported so the caller can surface it.
    pub fn logout(&self) -> AuthResult<()> {
        let _guard = self.lock();

        self.state.send_replace(Session::empty());
        self.storage.remove_many(&ALL_KEYS)?;
        Ok(())
    }

    // Caller holds the write guard.
    fn write_tokens(
        &self,
        access_token: SecretString,
        refresh_token: SecretString,
    ) -> AuthResult<()> {
        self.storage.set_many(&[
            (KEY_IS_AUTHENTICATED, "true"),
            (KEY_ACCESS_TOKEN, access_token.expose()),
            (KEY_REFRESH_TOKEN, refresh_token.expose()),
        ])?;

        let next = self.state.borrow().with_tokens(TokenPair {
            access_token,
            refresh_token,
        });
        self.state.send_replace(next);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::storage::{FileStore, MemoryStore};

    fn secret(value: &str) -> SecretString {
        SecretString::new(value)
    }

    #[test]
    fn test_starts_empty_without_storage() {
        let store = SessionStore::restore(MemoryStore::new()).unwrap();
        assert_eq!(store.get(), Session::empty());
    }

    #[test]
    fn test_login_writes_individual_keys() {
        let storage = MemoryStore::new();
        let store = SessionStore::restore(storage.clone()).unwrap();

        store.login(secret("a1"), secret("r1"), "u1".into()).unwrap();

        assert_eq!(storage.get(KEY_IS_AUTHENTICATED).unwrap().as_deref(), Some("true"));
        assert_eq!(storage.get(KEY_ACCESS_TOKEN).unwrap().as_deref(), Some("a1"));
        assert_eq!(storage.get(KEY_REFRESH_TOKEN).unwrap().as_deref(), Some("r1"));
        assert_eq!(storage.get(KEY_USER_ID).unwrap().as_deref(), Some("u1"));
    }

    #[test]
    fn test_login_then_reload_restores_identical_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::restore(FileStore::open(&path).unwrap()).unwrap();
        store.login(secret("a1"), secret("r1"), "u1".into()).unwrap();
        let before = store.get();
        drop(store);

        let reloaded = SessionStore::restore(FileStore::open(&path).unwrap()).unwrap();
        assert_eq!(reloaded.get(), before);
        assert!(reloaded.get().is_authenticated());
    }

    #[test]
    fn test_logout_clears_everything() {
        let storage = MemoryStore::new();
        let store = SessionStore::restore(storage.clone()).unwrap();
        store.login(secret("a1"), secret("r1"), "u1".into()).unwrap();

        store.logout().unwrap();

        let session = store.get();
        assert!(!session.is_authenticated());
        assert!(session.access_token().is_none());
        assert!(session.refresh_token().is_none());
        assert!(session.user_id().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_set_tokens_keeps_user() {
        let storage = MemoryStore::new();
        let store = SessionStore::restore(storage.clone()).unwrap();
        store.login(secret("a1"), secret("r1"), "u1".into()).unwrap();

        store.set_tokens(secret("a2"), secret("r2")).unwrap();

        let session = store.get();
        assert_eq!(session.access_token().unwrap().expose(), "a2");
        assert_eq!(session.refresh_token().unwrap().expose(), "r2");
        assert_eq!(session.user_id().unwrap().as_str(), "u1");
        assert_eq!(storage.get(KEY_ACCESS_TOKEN).unwrap().as_deref(), Some("a2"));
    }

    #[test]
    fn test_replace_tokens_after_logout_writes_nothing() {
        let storage = MemoryStore::new();
        let store = SessionStore::restore(storage.clone()).unwrap();
        store.login(secret("a1"), secret("r1"), "u1".into()).unwrap();
        store.logout().unwrap();

        let written = store
            .replace_tokens(&secret("r1"), secret("a2"), secret("r2"))
            .unwrap();

        assert!(!written);
        assert_eq!(store.get(), Session::empty());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_replace_tokens_requires_the_same_refresh_token() {
        let store = SessionStore::restore(MemoryStore::new()).unwrap();
        store.login(secret("a1"), secret("r1"), "u1".into()).unwrap();

        assert!(!store
            .replace_tokens(&secret("r0"), secret("a2"), secret("r2"))
            .unwrap());
        assert_eq!(store.get().access_token().unwrap().expose(), "a1");

        assert!(store
            .replace_tokens(&secret("r1"), secret("a2"), secret("r2"))
            .unwrap());
        assert_eq!(store.get().access_token().unwrap().expose(), "a2");
        assert_eq!(store.get().user_id().unwrap().as_str(), "u1");
    }

    #[test]
    fn test_partial_record_restores_empty_and_is_cleaned() {
        let storage = MemoryStore::new();
        storage
            .set_many(&[
                (KEY_IS_AUTHENTICATED, "true"),
                (KEY_ACCESS_TOKEN, "a1"),
                (KEY_USER_ID, "u1"),
            ])
            .unwrap();

        let store = SessionStore::restore(storage.clone()).unwrap();
        assert!(!store.get().is_authenticated());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_observe_whole_snapshots() {
        let store = SessionStore::restore(MemoryStore::new()).unwrap();
        let mut rx = store.subscribe();

        store.login(secret("a1"), secret("r1"), "u1".into()).unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_authenticated());

        store.logout().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Session::empty());
    }
}
