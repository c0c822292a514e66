//! In-progress form state, keyed by chat id.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Where a conversation stands in the three-step form. Collected answers
/// ride along in the variants, so by the time a form finishes every field is
/// present by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversation {
    AwaitingName,
    AwaitingPhone { name: String },
    AwaitingDate { name: String, phone: String },
}

/// Store interface the state machine runs against. In-memory today; a
/// durable backend can slot in without touching the machine. Entries live
/// until the form completes — abandoned conversations are never expired.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn get(&self, chat_id: i64) -> Option<Conversation>;
    async fn insert(&self, chat_id: i64, conversation: Conversation);
    /// Remove and return the state, leaving the conversation idle.
    async fn remove(&self, chat_id: i64) -> Option<Conversation>;
}

#[derive(Default)]
pub struct MemoryConversationStore {
    inner: Mutex<HashMap<i64, Conversation>>,
}

impl MemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for MemoryConversationStore {
    async fn get(&self, chat_id: i64) -> Option<Conversation> {
        self.inner.lock().await.get(&chat_id).cloned()
    }

    async fn insert(&self, chat_id: i64, conversation: Conversation) {
        self.inner.lock().await.insert(chat_id, conversation);
    }

    async fn remove(&self, chat_id: i64) -> Option<Conversation> {
        self.inner.lock().await.remove(&chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn entries_are_partitioned_by_chat() {
        let store = MemoryConversationStore::new();

        store.insert(1, Conversation::AwaitingName).await;
        store
            .insert(
                2,
                Conversation::AwaitingPhone {
                    name: "Bob".to_string(),
                },
            )
            .await;

        assert_eq!(store.get(1).await, Some(Conversation::AwaitingName));
        assert_eq!(
            store.get(2).await,
            Some(Conversation::AwaitingPhone {
                name: "Bob".to_string()
            })
        );
        assert_eq!(store.get(3).await, None);
    }

    #[tokio::test]
    async fn remove_returns_the_state_and_leaves_idle() {
        let store = MemoryConversationStore::new();
        store.insert(1, Conversation::AwaitingName).await;

        assert_eq!(store.remove(1).await, Some(Conversation::AwaitingName));
        assert_eq!(store.get(1).await, None);
        assert_eq!(store.remove(1).await, None);
    }

    #[tokio::test]
    async fn insert_replaces_the_previous_step() {
        let store = MemoryConversationStore::new();
        store.insert(1, Conversation::AwaitingName).await;
        store
            .insert(
                1,
                Conversation::AwaitingPhone {
                    name: "Alice".to_string(),
                },
            )
            .await;

        assert_eq!(
            store.get(1).await,
            Some(Conversation::AwaitingPhone {
                name: "Alice".to_string()
            })
        );
    }
}
