//! In-memory session store.
//!
//! Sessions are ephemeral by design; losing them on restart matches
//! the abandonment semantics, so no durable backend is wired in.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::dialogue::SessionRecord;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, record: SessionRecord) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(record.session_id(), record);
        Ok(())
    }

    async fn load(&self, id: SessionId) -> Result<SessionRecord, SessionStoreError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .cloned()
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn delete(&self, id: SessionId) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .remove(&id)
            .map(|_| ())
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn list_ids(&self) -> Result<Vec<SessionId>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::DialogueController;

    fn record() -> SessionRecord {
        SessionRecord::new(DialogueController::new(SessionId::new()))
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = InMemorySessionStore::new();
        let record = record();
        let id = record.session_id();

        store.save(record).await.unwrap();
        let loaded = store.load(id).await.unwrap();
        assert_eq!(loaded.session_id(), id);
    }

    #[tokio::test]
    async fn loading_a_missing_session_fails() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();
        assert!(matches!(
            store.load(id).await,
            Err(SessionStoreError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn delete_removes_the_session() {
        let store = InMemorySessionStore::new();
        let record = record();
        let id = record.session_id();
        store.save(record).await.unwrap();

        store.delete(id).await.unwrap();
        assert!(store.load(id).await.is_err());
        assert!(store.delete(id).await.is_err());
    }

    #[tokio::test]
    async fn list_ids_reflects_contents() {
        let store = InMemorySessionStore::new();
        assert!(store.list_ids().await.unwrap().is_empty());
        store.save(record()).await.unwrap();
        store.save(record()).await.unwrap();
        assert_eq!(store.list_ids().await.unwrap().len(), 2);
    }
}
