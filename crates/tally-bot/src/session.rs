//! Per-user conversation sessions
//!
//! A session belongs to exactly one (chat, user) pair and holds the current
//! conversation state plus whatever the in-flight flow stashed in the state
//! payload. Sessions live only in memory: they are created lazily on first
//! interaction and lost on restart, which is correct by design.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

/// Session key: (chat id, user id)
pub type SessionKey = (i64, i64);

/// Conversation state with flow-scoped scratch data folded into the variants
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChatState {
    /// Initial state, and where every flow ends up on success, failure,
    /// or cancellation
    #[default]
    Default,
    /// The next text input is a new category name
    AwaitingCategoryName,
    /// The next text input is an expense amount for the selected category
    AwaitingExpenseAmount { category_id: i64 },
    /// The next text input renames the selected category; the prompting
    /// message is deleted once the rename lands
    AwaitingNewCategoryName {
        category_id: i64,
        prompt_message_id: Option<i64>,
    },
}

/// One conversation session
#[derive(Debug, Default)]
pub struct Session {
    pub state: ChatState,
}

impl Session {
    /// Force the session back to the default state, dropping any in-flight
    /// flow data
    pub fn reset(&mut self) {
        self.state = ChatState::Default;
    }
}

/// Concurrency-safe store of sessions keyed by (chat, user)
///
/// Each session sits behind its own mutex: the dispatcher holds it for the
/// whole handling of an event, so events from the same pair are processed
/// in arrival order while distinct sessions proceed concurrently.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionKey, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the session for a key, creating it lazily
    pub async fn session(&self, key: SessionKey) -> Arc<Mutex<Session>> {
        {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(&key) {
                return Arc::clone(session);
            }
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(sessions.entry(key).or_default())
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sessions_are_created_lazily() {
        let store = SessionStore::new();
        assert_eq!(store.len().await, 0);

        let session = store.session((1, 1)).await;
        assert_eq!(session.lock().await.state, ChatState::Default);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_same_key_returns_same_session() {
        let store = SessionStore::new();

        {
            let session = store.session((5, 7)).await;
            session.lock().await.state = ChatState::AwaitingCategoryName;
        }

        let again = store.session((5, 7)).await;
        assert_eq!(again.lock().await.state, ChatState::AwaitingCategoryName);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = SessionStore::new();

        store.session((1, 1)).await.lock().await.state =
            ChatState::AwaitingExpenseAmount { category_id: 9 };

        let other = store.session((2, 2)).await;
        assert_eq!(other.lock().await.state, ChatState::Default);
    }

    #[tokio::test]
    async fn test_reset_drops_flow_data() {
        let mut session = Session {
            state: ChatState::AwaitingNewCategoryName {
                category_id: 3,
                prompt_message_id: Some(10),
            },
        };
        session.reset();
        assert_eq!(session.state, ChatState::Default);
    }
}
