//! Chat Session Store — in-memory, per-session, append-only turn logs.
//!
//! The lock is only held for the duration of a read or an append, never
//! across an LLM call.

pub mod handlers;
pub mod models;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::documents::{DocumentKind, ExtractedDocument};
use crate::errors::AppError;
use crate::session::models::{ChatSession, ChatTurn, Role};

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, ChatSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> ChatSession {
        let session = ChatSession::new();
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        info!("Created chat session {}", session.id);
        session
    }

    /// Snapshot of a session.
    pub async fn get(&self, id: Uuid) -> Result<ChatSession, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub async fn append_turn(
        &self,
        id: Uuid,
        role: Role,
        content: impl Into<String>,
    ) -> Result<ChatTurn, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        Ok(session.append(role, content).clone())
    }

    pub async fn set_document(
        &self,
        id: Uuid,
        document: ExtractedDocument,
    ) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        session.set_document(document);
        Ok(())
    }

    pub async fn clear_document(&self, id: Uuid, kind: DocumentKind) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        session.clear_document(kind);
        Ok(())
    }

    /// Ends a session, dropping its turns and documents.
    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        info!("Removed chat session {id}");
        Ok(())
    }

    /// Drops sessions with no activity for at least `ttl`. Returns how many went.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.last_active().elapsed() < ttl);
        before - sessions.len()
    }

    /// Sweeps idle sessions in the background until the runtime shuts down.
    pub fn spawn_idle_eviction(&self, ttl: Duration) -> JoinHandle<()> {
        let store = self.clone();
        let period = ttl.min(Duration::from_secs(60)).max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let evicted = store.evict_idle(ttl).await;
                if evicted > 0 {
                    info!("Evicted {evicted} idle chat session(s)");
                } else {
                    debug!("Idle session sweep: nothing to evict");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::DocumentKind;

    #[tokio::test]
    async fn test_create_then_get() {
        let store = SessionStore::new();
        let session = store.create().await;
        let fetched = store.get(session.id).await.unwrap();
        assert_eq!(fetched.id, session.id);
        assert_eq!(fetched.turns().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = SessionStore::new();
        let err = store.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = store
            .append_turn(Uuid::new_v4(), Role::User, "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_append_turn_is_visible_in_later_snapshots() {
        let store = SessionStore::new();
        let id = store.create().await.id;
        let before = store.get(id).await.unwrap();

        store.append_turn(id, Role::User, "question").await.unwrap();
        store.append_turn(id, Role::Assistant, "answer").await.unwrap();

        assert_eq!(before.turns().len(), 1);
        let after = store.get(id).await.unwrap();
        assert_eq!(after.turns().len(), 3);
        assert_eq!(after.turns()[2].content, "answer");
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.create().await.id;
        let b = store.create().await.id;

        store
            .set_document(
                a,
                ExtractedDocument::from_text(DocumentKind::JobDescription, "JD for a").unwrap(),
            )
            .await
            .unwrap();
        store.append_turn(a, Role::User, "only in a").await.unwrap();

        let b = store.get(b).await.unwrap();
        assert!(b.job_description_text().is_none());
        assert_eq!(b.turns().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_document_after_set() {
        let store = SessionStore::new();
        let id = store.create().await.id;
        store
            .set_document(
                id,
                ExtractedDocument::from_text(DocumentKind::Resume, "old resume").unwrap(),
            )
            .await
            .unwrap();

        store.clear_document(id, DocumentKind::Resume).await.unwrap();

        assert!(store.get(id).await.unwrap().resume_text().is_none());
    }

    #[tokio::test]
    async fn test_remove_then_get_is_not_found() {
        let store = SessionStore::new();
        let id = store.create().await.id;

        store.remove(id).await.unwrap();

        assert!(matches!(store.get(id).await.unwrap_err(), AppError::NotFound(_)));
        assert!(matches!(store.remove(id).await.unwrap_err(), AppError::NotFound(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_evict_idle_keeps_recently_active_sessions() {
        let store = SessionStore::new();
        let idle = store.create().await.id;
        let active = store.create().await.id;

        tokio::time::advance(Duration::from_secs(50)).await;
        store.append_turn(active, Role::User, "still here").await.unwrap();
        tokio::time::advance(Duration::from_secs(20)).await;

        let evicted = store.evict_idle(Duration::from_secs(60)).await;

        assert_eq!(evicted, 1);
        assert!(store.get(idle).await.is_err());
        assert!(store.get(active).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_eviction_sweeps_idle_sessions() {
        let store = SessionStore::new();
        let id = store.create().await.id;
        let handle = store.spawn_idle_eviction(Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(11)).await;

        assert!(store.get(id).await.is_err());
        handle.abort();
    }
}
