//! Thread-safe session store.

use pcore::Session;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};

/// Concurrent map from session identifier to conversation state.
///
/// Each session sits behind its own `Arc<Mutex<_>>`: the orchestrator
/// holds that mutex for the whole turn, so concurrent requests for the
/// same session id are serialized while distinct sessions proceed in
/// parallel. Sessions live for the process lifetime; there is no
/// eviction.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// The session for a known id, otherwise a fresh session with a
    /// generated id, registered before it is returned.
    pub async fn resolve(&self, id: Option<&str>) -> Arc<Mutex<Session>> {
        if let Some(id) = id
            && let Some(entry) = self.sessions.read().await.get(id)
        {
            return Arc::clone(entry);
        }

        let session = Session::new();
        let key = session.id.clone();
        let entry = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(key, Arc::clone(&entry));
        entry
    }

    /// Look up a session by id.
    pub async fn get(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(id).map(Arc::clone)
    }

    /// Clone the current state of a session. Read path; never errors.
    pub async fn snapshot(&self, id: &str) -> Option<Session> {
        let entry = self.get(id).await?;
        let session = entry.lock().await;
        Some(session.clone())
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the store holds no sessions.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcore::Role;

    #[tokio::test]
    async fn resolve_none_creates_fresh_session() {
        let store = SessionStore::new();
        let a = store.resolve(None).await;
        let b = store.resolve(None).await;
        assert_ne!(a.lock().await.id, b.lock().await.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn resolve_known_id_returns_same_session() {
        let store = SessionStore::new();
        let entry = store.resolve(None).await;
        let id = entry.lock().await.id.clone();

        entry.lock().await.push(Role::User, "hello");
        let again = store.resolve(Some(&id)).await;
        assert_eq!(again.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn resolve_unknown_id_creates_fresh_session() {
        let store = SessionStore::new();
        let entry = store.resolve(Some("nonexistent")).await;
        // A fresh identifier is generated; the unknown id is not adopted.
        assert_ne!(entry.lock().await.id, "nonexistent");
        assert!(store.get("nonexistent").await.is_none());
    }

    #[tokio::test]
    async fn snapshot_clones_state() {
        let store = SessionStore::new();
        let entry = store.resolve(None).await;
        let id = entry.lock().await.id.clone();
        entry.lock().await.push(Role::User, "hi");

        let snap = store.snapshot(&id).await.unwrap();
        assert_eq!(snap.len(), 1);
        assert!(store.snapshot("missing").await.is_none());
    }
}
