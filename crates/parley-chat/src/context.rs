//! Conversation context retrieval.
//!
//! The generator fetches the last few messages of a conversation before
//! every reply. No rule reads them yet; the fetch is kept so that
//! context-aware rules can be added without changing the call contract.

use async_trait::async_trait;

use parley_core::types::{ConversationId, Message};
use parley_storage::MessageRepository;

use crate::error::ChatError;

/// Supplies the most recent messages of a conversation.
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    /// At most `limit` messages, oldest first. Empty for a conversation
    /// with no history.
    async fn recent_messages(
        &self,
        conversation_id: ConversationId,
        limit: usize,
    ) -> Result<Vec<Message>, ChatError>;
}

/// Bounded window of prior messages for one conversation, recomputed per call.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    pub conversation_id: ConversationId,
    pub messages: Vec<Message>,
}

impl ConversationContext {
    pub async fn fetch(
        retriever: &dyn ContextRetriever,
        conversation_id: ConversationId,
        limit: usize,
    ) -> Result<Self, ChatError> {
        let messages = retriever.recent_messages(conversation_id, limit).await?;
        Ok(Self {
            conversation_id,
            messages,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

#[async_trait]
impl ContextRetriever for MessageRepository {
    async fn recent_messages(
        &self,
        conversation_id: ConversationId,
        limit: usize,
    ) -> Result<Vec<Message>, ChatError> {
        let repo = self.clone();
        let messages = tokio::task::spawn_blocking(move || repo.recent(conversation_id, limit))
            .await
            .map_err(|e| ChatError::Context(format!("context task failed: {}", e)))??;
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parley_core::types::Sender;
    use parley_storage::{ConversationRepository, Database};
    use uuid::Uuid;

    use super::*;

    fn repos() -> (ConversationRepository, MessageRepository) {
        let db = Arc::new(Database::in_memory().unwrap());
        (
            ConversationRepository::new(Arc::clone(&db)),
            MessageRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_repository_retriever_returns_window_oldest_first() {
        let (conversations, messages) = repos();
        let conv = conversations.create("ctx").unwrap();
        messages.append(conv.id, "hello", Sender::User).unwrap();
        messages.append(conv.id, "Good morning!", Sender::Bot).unwrap();
        messages.append(conv.id, "what is sql", Sender::User).unwrap();
        messages.append(conv.id, "SQL is...", Sender::Bot).unwrap();

        let context = ConversationContext::fetch(&messages, conv.id, 3).await.unwrap();
        assert_eq!(context.conversation_id, conv.id);
        assert_eq!(context.len(), 3);
        let contents: Vec<&str> = context.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["Good morning!", "what is sql", "SQL is..."]);
    }

    #[tokio::test]
    async fn test_repository_retriever_unknown_conversation() {
        let (_, messages) = repos();
        let context = ConversationContext::fetch(&messages, Uuid::new_v4(), 3)
            .await
            .unwrap();
        assert!(context.is_empty());
    }
}
