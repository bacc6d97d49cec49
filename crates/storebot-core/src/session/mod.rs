//! Session logs for conversation inspection.
//!
//! Each exchange that arrives with a session id is appended to that
//! session's log. Logs live only as long as the process: nothing expires,
//! nothing is written to disk.
//!
//! The store sits behind the [`SessionStore`] trait so the gateway can be
//! handed a different backend. The responder never touches it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// One customer message and the assistant's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub user_message: String,
    pub bot_response: String,
    pub timestamp: String,
}

impl SessionEntry {
    pub fn new(
        user_message: impl Into<String>,
        bot_response: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            user_message: user_message.into(),
            bot_response: bot_response.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Aggregate counters across all sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Number of distinct session keys.
    pub active_sessions: usize,
    /// Sum of entry counts over every session.
    pub total_messages: usize,
}

/// Storage backend for session logs.
///
/// Appends to one key must be serialized: two concurrent appends to the
/// same session both land, each as a whole entry.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Append an entry to the log for `key`, creating the log if needed.
    async fn append(&self, key: &str, entry: SessionEntry) -> anyhow::Result<()>;

    /// Entries for `key` in append order. Unknown keys yield an empty list.
    async fn history(&self, key: &str) -> Vec<SessionEntry>;

    /// All known session keys, sorted.
    async fn keys(&self) -> Vec<String>;

    /// Counters across all sessions.
    async fn stats(&self) -> SessionStats;
}

/// Process-local session store.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Vec<SessionEntry>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn append(&self, key: &str, entry: SessionEntry) -> anyhow::Result<()> {
        let mut sessions = self.sessions.write().await;
        let log = sessions.entry(key.to_string()).or_default();
        log.push(entry);
        debug!(session = key, entries = log.len(), "Appended session entry");
        Ok(())
    }

    async fn history(&self, key: &str) -> Vec<SessionEntry> {
        let sessions = self.sessions.read().await;
        sessions.get(key).cloned().unwrap_or_default()
    }

    async fn keys(&self) -> Vec<String> {
        let sessions = self.sessions.read().await;
        let mut keys: Vec<String> = sessions.keys().cloned().collect();
        keys.sort();
        keys
    }

    async fn stats(&self) -> SessionStats {
        let sessions = self.sessions.read().await;
        SessionStats {
            active_sessions: sessions.len(),
            total_messages: sessions.values().map(Vec::len).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_append_keeps_call_order() {
        let store = InMemorySessionStore::new();
        store.append("web:1", SessionEntry::new("hi", "Hello!", "t1")).await.unwrap();
        store.append("web:1", SessionEntry::new("thanks", "You're welcome!", "t2")).await.unwrap();

        let history = store.history("web:1").await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].user_message, "hi");
        assert_eq!(history[1].bot_response, "You're welcome!");
    }

    #[tokio::test]
    async fn test_unknown_session_is_empty() {
        let store = InMemorySessionStore::new();
        assert!(store.history("missing").await.is_empty());
        assert_eq!(store.stats().await, SessionStats::default());
    }

    #[tokio::test]
    async fn test_stats_count_keys_and_entries() {
        let store = InMemorySessionStore::new();
        for i in 0..3 {
            store.append("a", SessionEntry::new(format!("m{}", i), "r", "t")).await.unwrap();
        }
        store.append("b", SessionEntry::new("m", "r", "t")).await.unwrap();

        let stats = store.stats().await;
        assert_eq!(stats.active_sessions, 2);
        assert_eq!(stats.total_messages, 4);
        assert_eq!(store.keys().await, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_concurrent_appends_to_one_key() {
        let store = Arc::new(InMemorySessionStore::new());
        let mut handles = Vec::new();
        for i in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .append("shared", SessionEntry::new(format!("msg {}", i), "reply", "t"))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let history = store.history("shared").await;
        assert_eq!(history.len(), 50);
        for i in 0..50 {
            let expected = format!("msg {}", i);
            assert!(history.iter().any(|e| e.user_message == expected));
        }
    }
}
