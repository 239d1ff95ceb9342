//! Per-session gate state.

use async_trait::async_trait;
use paygate_core::{Identity, SessionId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// What the gate remembers about one browser session.
///
/// A subscription status can only be recorded once an identity is cached,
/// so `subscribed() == Some(true)` always implies `identity().is_some()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    identity: Option<Identity>,
    subscribed: Option<bool>,
}

impl SessionState {
    /// Creates a state with a cached identity and no subscription status.
    #[must_use]
    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            subscribed: None,
        }
    }

    /// Returns the cached identity.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Returns the last recorded subscription status.
    #[must_use]
    pub fn subscribed(&self) -> Option<bool> {
        self.subscribed
    }

    /// Records the subscription status for the cached identity.
    ///
    /// Returns `false` and leaves the state unchanged if no identity is cached.
    pub fn record_subscription(&mut self, subscribed: bool) -> bool {
        if self.identity.is_none() {
            return false;
        }
        self.subscribed = Some(subscribed);
        true
    }
}

/// Storage for [`SessionState`] keyed by session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the state for `session_id`, if any.
    async fn get(&self, session_id: &SessionId) -> Option<SessionState>;

    /// Replaces the state for `session_id`.
    async fn put(&self, session_id: &SessionId, state: SessionState);

    /// Removes all state for `session_id`.
    async fn clear(&self, session_id: &SessionId);

    /// Removes every session past its lifetime and returns how many were removed.
    async fn delete_expired(&self) -> usize;
}

/// Session lifetime used when none is configured.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
struct StoredSession {
    state: SessionState,
    created_at: Instant,
}

impl StoredSession {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}

/// Process-local session store.
///
/// Clones share the same underlying map. An entry expires `ttl` after it was
/// first stored, matching the lifetime of the cookie issued with it; expired
/// entries read as absent and are dropped by [`SessionStore::delete_expired`].
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, StoredSession>>>,
    ttl: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

impl InMemorySessionStore {
    /// Creates an empty store whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Returns the session lifetime.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the number of sessions with state, expired or not.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &SessionId) -> Option<SessionState> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .filter(|stored| !stored.is_expired(self.ttl))
            .map(|stored| stored.state.clone())
    }

    async fn put(&self, session_id: &SessionId, state: SessionState) {
        let mut sessions = self.sessions.write().await;
        let created_at = sessions
            .get(session_id)
            .filter(|stored| !stored.is_expired(self.ttl))
            .map_or_else(Instant::now, |stored| stored.created_at);
        sessions.insert(session_id.clone(), StoredSession { state, created_at });
    }

    async fn clear(&self, session_id: &SessionId) {
        self.sessions.write().await.remove(session_id);
    }

    async fn delete_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| !stored.is_expired(self.ttl));
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_requires_identity() {
        let mut state = SessionState::default();
        assert!(!state.record_subscription(true));
        assert_eq!(state.subscribed(), None);
        assert!(state.identity().is_none());
    }

    #[test]
    fn subscription_recorded_for_identity() {
        let mut state = SessionState::authenticated(Identity::new("a@b.com"));
        assert!(state.record_subscription(true));
        assert_eq!(state.subscribed(), Some(true));
        assert!(state.record_subscription(false));
        assert_eq!(state.subscribed(), Some(false));
    }

    #[tokio::test]
    async fn store_round_trip_and_clear() {
        let store = InMemorySessionStore::default();
        let id = SessionId::from("sess_1");
        assert!(store.get(&id).await.is_none());

        let state = SessionState::authenticated(Identity::new("a@b.com"));
        store.put(&id, state.clone()).await;
        assert_eq!(store.get(&id).await, Some(state));

        store.clear(&id).await;
        assert!(store.get(&id).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = InMemorySessionStore::default();
        let a = SessionId::from("a");
        let b = SessionId::from("b");
        store
            .put(&a, SessionState::authenticated(Identity::new("a@b.com")))
            .await;

        assert!(store.get(&b).await.is_none());
        store.clear(&b).await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemorySessionStore::default();
        let clone = store.clone();
        let id = SessionId::from("shared");
        store.put(&id, SessionState::default()).await;
        assert!(clone.get(&id).await.is_some());
    }

    #[tokio::test]
    async fn expired_sessions_read_as_absent_and_are_evicted() {
        let store = InMemorySessionStore::new(Duration::ZERO);
        let id = SessionId::from("old");
        store
            .put(&id, SessionState::authenticated(Identity::new("a@b.com")))
            .await;

        assert!(store.get(&id).await.is_none());
        assert_eq!(store.len().await, 1);
        assert_eq!(store.delete_expired().await, 1);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn live_sessions_survive_eviction() {
        let store = InMemorySessionStore::default();
        let id = SessionId::from("fresh");
        store.put(&id, SessionState::default()).await;

        assert_eq!(store.delete_expired().await, 0);
        assert!(store.get(&id).await.is_some());
    }

    #[tokio::test]
    async fn updates_keep_the_original_lifetime() {
        let store = InMemorySessionStore::new(Duration::from_millis(50));
        let id = SessionId::from("s");
        store.put(&id, SessionState::default()).await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        store
            .put(&id, SessionState::authenticated(Identity::new("a@b.com")))
            .await;
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(store.get(&id).await.is_none());
        assert_eq!(store.delete_expired().await, 1);
    }
}
