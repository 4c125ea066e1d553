//! Port for session persistence between turns.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::dialogue::SessionRecord;
use crate::domain::foundation::SessionId;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session {0} not found")]
    NotFound(SessionId),

    #[error("session storage error: {0}")]
    Backend(String),
}

/// Whole-record session storage.
///
/// Records are saved and loaded as a unit; one request drives a
/// session at a time, so the store needs no partial updates.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(&self, record: SessionRecord) -> Result<(), SessionStoreError>;

    async fn load(&self, id: SessionId) -> Result<SessionRecord, SessionStoreError>;

    async fn delete(&self, id: SessionId) -> Result<(), SessionStoreError>;

    async fn list_ids(&self) -> Result<Vec<SessionId>, SessionStoreError>;
}
