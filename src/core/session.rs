// src/core/session.rs — Per-client session state and the registry that owns it

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::core::conversation::ConversationStore;
use crate::core::journal::{Journal, JournalEntry};
use crate::core::mood::{MoodLedger, TrendPoint, LEGEND};
use crate::core::tasks::{Task, TaskBoard};
use crate::infra::errors::CompanionError;
use crate::provider::Message;

/// Everything one connected client owns. Dropped when the session ends.
///
/// Each part sits behind its own lock. `turn` serializes chat turns, so a
/// pending gateway call holds no lock on the data itself.
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub turn: Mutex<()>,
    pub conversation: Mutex<ConversationStore>,
    pub mood: Mutex<MoodLedger>,
    pub tasks: Mutex<TaskBoard>,
    pub journal: Mutex<Journal>,
}

impl Session {
    pub fn new(task_names: &[String]) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            turn: Mutex::new(()),
            conversation: Mutex::new(ConversationStore::new()),
            mood: Mutex::new(MoodLedger::new()),
            tasks: Mutex::new(TaskBoard::new(task_names.iter().cloned())),
            journal: Mutex::new(Journal::new()),
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.clone(),
            created_at: self.created_at,
            messages: self.conversation.lock().await.messages().to_vec(),
            mood: MoodView::from(&*self.mood.lock().await),
            tasks: self.tasks.lock().await.tasks().to_vec(),
            journal: self.journal.lock().await.entries().to_vec(),
        }
    }
}

/// Mood data prepared for the trend chart.
#[derive(Debug, Clone, Serialize)]
pub struct MoodView {
    pub trend: Vec<TrendPoint>,
    pub latest: Option<u8>,
    pub average: Option<f64>,
    pub legend: &'static str,
}

impl From<&MoodLedger> for MoodView {
    fn from(ledger: &MoodLedger) -> Self {
        Self {
            trend: ledger.trend(),
            latest: ledger.latest().map(|s| s.level.value()),
            average: ledger.average(),
            legend: LEGEND,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<Message>,
    pub mood: MoodView,
    pub tasks: Vec<Task>,
    pub journal: Vec<JournalEntry>,
}

pub type SessionHandle = Arc<Session>;

/// Live sessions keyed by id.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionHandle>>,
    task_names: Vec<String>,
}

impl SessionRegistry {
    pub fn new(task_names: Vec<String>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            task_names,
        }
    }

    /// Start a fresh, empty session.
    pub async fn create(&self) -> (String, SessionHandle) {
        let session = Session::new(&self.task_names);
        let id = session.id.clone();
        let handle = Arc::new(session);
        self.sessions.write().await.insert(id.clone(), handle.clone());
        tracing::debug!(session = %id, "Session started");
        (id, handle)
    }

    pub async fn get(&self, id: &str) -> Result<SessionHandle, CompanionError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| CompanionError::SessionNotFound { id: id.to_string() })
    }

    /// End a session, discarding all its state.
    pub async fn end(&self, id: &str) -> Result<(), CompanionError> {
        match self.sessions.write().await.remove(id) {
            Some(_) => {
                tracing::debug!(session = %id, "Session ended");
                Ok(())
            }
            None => Err(CompanionError::SessionNotFound { id: id.to_string() }),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["Drink Water".into(), "Journaling".into()]
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let registry = SessionRegistry::new(names());
        let (a_id, a) = registry.create().await;
        let (b_id, b) = registry.create().await;
        assert_ne!(a_id, b_id);

        a.tasks.lock().await.toggle("Drink Water").unwrap();
        a.conversation.lock().await.push_user("hi");

        assert_eq!(b.tasks.lock().await.is_done("Drink Water"), Some(false));
        assert!(b.conversation.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_end_removes_session() {
        let registry = SessionRegistry::new(names());
        let (id, _) = registry.create().await;
        assert_eq!(registry.len().await, 1);
        registry.end(&id).await.unwrap();
        assert!(registry.is_empty().await);
        assert!(matches!(
            registry.get(&id).await,
            Err(CompanionError::SessionNotFound { .. })
        ));
        assert!(registry.end(&id).await.is_err());
    }

    #[tokio::test]
    async fn test_parts_lock_independently_of_turn() {
        let session = Session::new(&names());
        let _turn = session.turn.lock().await;

        session.tasks.lock().await.toggle("Journaling").unwrap();
        session.journal.lock().await.save("mid-turn note").unwrap();
        assert!(session.turn.try_lock().is_err());
        assert_eq!(session.snapshot().await.journal.len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_starts_empty() {
        let snap = Session::new(&names()).snapshot().await;
        assert!(snap.messages.is_empty());
        assert!(snap.mood.trend.is_empty());
        assert!(snap.mood.latest.is_none());
        assert_eq!(snap.tasks.len(), 2);
        assert!(snap.tasks.iter().all(|t| !t.done));
        assert!(snap.journal.is_empty());
    }
}
