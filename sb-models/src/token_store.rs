//! Persisted session token and identity snapshot.
//!
//! Both entries live in the key-value store under fixed keys and are always
//! written and removed together. State transitions are broadcast on a watch
//! channel so the UI layer can react to a 401-triggered sign-out.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use sb_core::constants::storage_keys::{AUTH_TOKEN, AUTH_USER};
use sb_core::error::{SbError, SbResult};

use crate::models::session::{Identity, Session, SessionState};
use crate::store::{MemoryStore, SharedStore};

/// Cloneable handle to the persisted session.
#[derive(Clone)]
pub struct TokenStore {
    store: SharedStore,
    state_tx: Arc<watch::Sender<SessionState>>,
}

impl TokenStore {
    /// Wrap a key-value store. The initial state reflects what is persisted.
    pub fn new(store: SharedStore) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Anonymous);
        let tokens = Self {
            store,
            state_tx: Arc::new(state_tx),
        };
        if tokens.load().is_some() {
            tokens.set_state(SessionState::Authenticated);
        }
        tokens
    }

    /// Token store over a fresh in-memory map.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Underlying key-value store, for the scratch entries that share it.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Persist token and identity as one unit.
    pub fn save(&self, session: &Session) -> SbResult<()> {
        let user = serde_json::to_string(&session.user)?;
        self.store
            .set_many(&[(AUTH_TOKEN, session.token.as_str()), (AUTH_USER, user.as_str())])?;
        info!("session saved for user {}", session.user.id);
        self.set_state(SessionState::Authenticated);
        Ok(())
    }

    /// Load the persisted session.
    ///
    /// Never fails: a storage error, a missing half or an undecodable
    /// identity all read as no session.
    pub fn load(&self) -> Option<Session> {
        let token = match self.store.get(AUTH_TOKEN) {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return None,
            Err(e) => {
                warn!("failed to read session token: {}", e);
                return None;
            }
        };
        let raw_user = match self.store.get(AUTH_USER) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                warn!("session token present without identity");
                return None;
            }
            Err(e) => {
                warn!("failed to read session identity: {}", e);
                return None;
            }
        };
        match serde_json::from_str::<Identity>(&raw_user) {
            Ok(user) => Some(Session::new(token, user)),
            Err(e) => {
                warn!("discarding corrupt session identity: {}", e);
                None
            }
        }
    }

    /// Current bearer token, if any.
    pub fn token(&self) -> SbResult<Option<String>> {
        Ok(self.store.get(AUTH_TOKEN)?.filter(|t| !t.is_empty()))
    }

    /// Remove token and identity. Clearing an empty store is a no-op.
    pub fn clear(&self) -> SbResult<()> {
        self.store
            .remove_many(&[AUTH_TOKEN, AUTH_USER])
            .map_err(|e| SbError::Storage(format!("failed to clear session: {e}")))?;
        debug!("session cleared");
        self.set_state(SessionState::Anonymous);
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        *self.state_tx.borrow()
    }

    /// Subscribe to session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    fn set_state(&self, new_state: SessionState) {
        self.state_tx.send_if_modified(|state| {
            if *state == new_state {
                return false;
            }
            info!("session state: {} -> {}", *state, new_state);
            *state = new_state;
            true
        });
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(
            "t1",
            Identity {
                id: 7,
                full_name: "A".into(),
                email: "a@b.com".into(),
                avatar: None,
                phone_number: None,
            },
        )
    }

    #[test]
    fn test_save_then_load() {
        let tokens = TokenStore::in_memory();
        assert!(tokens.load().is_none());
        assert_eq!(tokens.state(), SessionState::Anonymous);

        tokens.save(&session()).unwrap();
        assert_eq!(tokens.load(), Some(session()));
        assert_eq!(tokens.token().unwrap().as_deref(), Some("t1"));
        assert_eq!(tokens.state(), SessionState::Authenticated);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let tokens = TokenStore::in_memory();
        tokens.save(&session()).unwrap();
        tokens.clear().unwrap();
        tokens.clear().unwrap();
        assert!(tokens.load().is_none());
        assert!(tokens.token().unwrap().is_none());
        assert_eq!(tokens.state(), SessionState::Anonymous);
    }

    #[test]
    fn test_corrupt_identity_reads_as_no_session() {
        let tokens = TokenStore::in_memory();
        tokens.store().set(AUTH_TOKEN, "t1").unwrap();
        tokens.store().set(AUTH_USER, "{not json").unwrap();
        assert!(tokens.load().is_none());
    }

    #[test]
    fn test_token_without_identity_reads_as_no_session() {
        let tokens = TokenStore::in_memory();
        tokens.store().set(AUTH_TOKEN, "t1").unwrap();
        assert!(tokens.load().is_none());
    }

    #[test]
    fn test_initial_state_reflects_persisted_session() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        TokenStore::new(store.clone()).save(&session()).unwrap();
        let reopened = TokenStore::new(store);
        assert_eq!(reopened.state(), SessionState::Authenticated);
    }

    #[tokio::test]
    async fn test_subscribers_see_clear() {
        let tokens = TokenStore::in_memory();
        tokens.save(&session()).unwrap();
        let mut rx = tokens.subscribe();

        let clearer = tokens.clone();
        tokio::spawn(async move {
            clearer.clear().unwrap();
        });

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), SessionState::Anonymous);
    }
}
