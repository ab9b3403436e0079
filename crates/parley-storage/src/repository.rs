//! Repository implementations for SQLite-backed persistence.
//!
//! `ConversationRepository` manages the conversation list and
//! `MessageRepository` appends to and reads from a conversation's history.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::OptionalExtension;
use tracing::debug;
use uuid::Uuid;

use parley_core::error::ParleyError;
use parley_core::types::{Conversation, ConversationId, Message, Sender};

use crate::db::Database;

/// Repository for conversations.
#[derive(Clone)]
pub struct ConversationRepository {
    db: Arc<Database>,
}

impl ConversationRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create and store a new conversation.
    pub fn create(&self, name: &str) -> Result<Conversation, ParleyError> {
        let conversation = Conversation::new(name);
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO conversations (id, name, created_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![
                    conversation.id.to_string(),
                    conversation.name,
                    conversation.created_at.timestamp_millis(),
                ],
            )
            .map_err(|e| ParleyError::Storage(format!("Failed to create conversation: {}", e)))?;
            Ok(())
        })?;
        debug!(conversation_id = %conversation.id, "Conversation created");
        Ok(conversation)
    }

    /// List all conversations, newest first.
    pub fn list(&self) -> Result<Vec<Conversation>, ParleyError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, name, created_at FROM conversations
                     ORDER BY created_at DESC, rowid DESC",
                )
                .map_err(|e| ParleyError::Storage(e.to_string()))?;

            let rows = stmt
                .query_map([], |row| Ok(row_to_conversation(row)))
                .map_err(|e| ParleyError::Storage(e.to_string()))?;

            let mut conversations = Vec::new();
            for row in rows {
                conversations.push(row.map_err(|e| ParleyError::Storage(e.to_string()))??);
            }
            Ok(conversations)
        })
    }

    /// Find a conversation by ID.
    pub fn find_by_id(&self, id: ConversationId) -> Result<Option<Conversation>, ParleyError> {
        self.db.with_conn(|conn| {
            let result = conn
                .query_row(
                    "SELECT id, name, created_at FROM conversations WHERE id = ?1",
                    rusqlite::params![id.to_string()],
                    |row| Ok(row_to_conversation(row)),
                )
                .optional()
                .map_err(|e| ParleyError::Storage(e.to_string()))?;

            result.transpose()
        })
    }

    /// Delete a conversation together with all of its messages.
    ///
    /// Returns `false` if no conversation with that ID existed.
    pub fn delete(&self, id: ConversationId) -> Result<bool, ParleyError> {
        let deleted = self.db.with_conn_mut(|conn| {
            let tx = conn
                .transaction()
                .map_err(|e| ParleyError::Storage(e.to_string()))?;
            tx.execute(
                "DELETE FROM messages WHERE conversation_id = ?1",
                rusqlite::params![id.to_string()],
            )
            .map_err(|e| ParleyError::Storage(format!("Failed to delete messages: {}", e)))?;
            let removed = tx
                .execute(
                    "DELETE FROM conversations WHERE id = ?1",
                    rusqlite::params![id.to_string()],
                )
                .map_err(|e| {
                    ParleyError::Storage(format!("Failed to delete conversation: {}", e))
                })?;
            tx.commit()
                .map_err(|e| ParleyError::Storage(e.to_string()))?;
            Ok(removed > 0)
        })?;
        debug!(conversation_id = %id, deleted, "Conversation delete");
        Ok(deleted)
    }
}

/// Repository for chat messages.
#[derive(Clone)]
pub struct MessageRepository {
    db: Arc<Database>,
}

impl MessageRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Append a message to a conversation.
    pub fn append(
        &self,
        conversation_id: ConversationId,
        content: &str,
        sender: Sender,
    ) -> Result<Message, ParleyError> {
        let message = Message::new(conversation_id, content, sender);
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (id, conversation_id, content, sender, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    message.id.to_string(),
                    message.conversation_id.to_string(),
                    message.content,
                    message.sender.as_str(),
                    message.timestamp.timestamp_millis(),
                ],
            )
            .map_err(|e| ParleyError::Storage(format!("Failed to save message: {}", e)))?;
            Ok(())
        })?;
        Ok(message)
    }

    /// The newest `limit` messages of a conversation, returned oldest first.
    ///
    /// An unknown conversation yields an empty list.
    pub fn recent(
        &self,
        conversation_id: ConversationId,
        limit: usize,
    ) -> Result<Vec<Message>, ParleyError> {
        let mut messages = self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, conversation_id, content, sender, timestamp
                     FROM messages
                     WHERE conversation_id = ?1
                     ORDER BY timestamp DESC, rowid DESC
                     LIMIT ?2",
                )
                .map_err(|e| ParleyError::Storage(e.to_string()))?;

            let rows = stmt
                .query_map(
                    rusqlite::params![conversation_id.to_string(), limit as i64],
                    |row| Ok(row_to_message(row)),
                )
                .map_err(|e| ParleyError::Storage(e.to_string()))?;

            let mut messages = Vec::new();
            for row in rows {
                messages.push(row.map_err(|e| ParleyError::Storage(e.to_string()))??);
            }
            Ok(messages)
        })?;
        messages.reverse();
        Ok(messages)
    }

    /// Count the messages stored for a conversation.
    pub fn count(&self, conversation_id: ConversationId) -> Result<u64, ParleyError> {
        self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM messages WHERE conversation_id = ?1",
                    rusqlite::params![conversation_id.to_string()],
                    |row| row.get(0),
                )
                .map_err(|e| ParleyError::Storage(e.to_string()))?;
            Ok(count as u64)
        })
    }
}

// =============================================================================
// Row mapping
// =============================================================================

fn parse_uuid(raw: &str) -> Result<Uuid, ParleyError> {
    Uuid::parse_str(raw).map_err(|e| ParleyError::Storage(format!("Invalid UUID {}: {}", raw, e)))
}

fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>, ParleyError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| ParleyError::Storage(format!("Invalid timestamp: {}", millis)))
}

fn row_to_conversation(row: &rusqlite::Row<'_>) -> Result<Conversation, ParleyError> {
    let id: String = row.get(0).map_err(|e| ParleyError::Storage(e.to_string()))?;
    let name: String = row.get(1).map_err(|e| ParleyError::Storage(e.to_string()))?;
    let created_at: i64 = row.get(2).map_err(|e| ParleyError::Storage(e.to_string()))?;

    Ok(Conversation {
        id: parse_uuid(&id)?,
        name,
        created_at: millis_to_datetime(created_at)?,
    })
}

fn row_to_message(row: &rusqlite::Row<'_>) -> Result<Message, ParleyError> {
    let id: String = row.get(0).map_err(|e| ParleyError::Storage(e.to_string()))?;
    let conversation_id: String = row.get(1).map_err(|e| ParleyError::Storage(e.to_string()))?;
    let content: String = row.get(2).map_err(|e| ParleyError::Storage(e.to_string()))?;
    let sender: String = row.get(3).map_err(|e| ParleyError::Storage(e.to_string()))?;
    let timestamp: i64 = row.get(4).map_err(|e| ParleyError::Storage(e.to_string()))?;

    Ok(Message {
        id: parse_uuid(&id)?,
        conversation_id: parse_uuid(&conversation_id)?,
        content,
        sender: sender.parse()?,
        timestamp: millis_to_datetime(timestamp)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repos() -> (ConversationRepository, MessageRepository) {
        let db = Arc::new(Database::in_memory().unwrap());
        (
            ConversationRepository::new(Arc::clone(&db)),
            MessageRepository::new(db),
        )
    }

    #[test]
    fn test_create_and_find_conversation() {
        let (conversations, _) = repos();
        let created = conversations.create("Databases").unwrap();

        let found = conversations.find_by_id(created.id).unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.name, "Databases");
        assert_eq!(
            found.created_at.timestamp_millis(),
            created.created_at.timestamp_millis()
        );
    }

    #[test]
    fn test_find_missing_conversation() {
        let (conversations, _) = repos();
        assert!(conversations.find_by_id(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_list_newest_first() {
        let (conversations, _) = repos();
        let first = conversations.create("first").unwrap();
        let second = conversations.create("second").unwrap();

        let listed = conversations.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[test]
    fn test_delete_removes_messages() {
        let (conversations, messages) = repos();
        let keep = conversations.create("keep").unwrap();
        let doomed = conversations.create("doomed").unwrap();
        messages.append(keep.id, "hello", Sender::User).unwrap();
        messages.append(doomed.id, "hello", Sender::User).unwrap();
        messages.append(doomed.id, "Good morning!", Sender::Bot).unwrap();

        assert!(conversations.delete(doomed.id).unwrap());
        assert!(conversations.find_by_id(doomed.id).unwrap().is_none());
        assert_eq!(messages.count(doomed.id).unwrap(), 0);
        assert_eq!(messages.count(keep.id).unwrap(), 1);
    }

    #[test]
    fn test_delete_unknown_conversation() {
        let (conversations, _) = repos();
        assert!(!conversations.delete(Uuid::new_v4()).unwrap());
    }

    #[test]
    fn test_append_requires_existing_conversation() {
        let (_, messages) = repos();
        let result = messages.append(Uuid::new_v4(), "orphan", Sender::User);
        assert!(matches!(result, Err(ParleyError::Storage(_))));
    }

    #[test]
    fn test_recent_is_oldest_first_and_bounded() {
        let (conversations, messages) = repos();
        let conv = conversations.create("history").unwrap();
        for i in 0..5 {
            let sender = if i % 2 == 0 { Sender::User } else { Sender::Bot };
            messages.append(conv.id, &format!("message {}", i), sender).unwrap();
        }

        let recent = messages.recent(conv.id, 3).unwrap();
        let contents: Vec<&str> = recent.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["message 2", "message 3", "message 4"]);
        assert_eq!(recent[0].sender, Sender::User);
        assert_eq!(recent[1].sender, Sender::Bot);
    }

    #[test]
    fn test_recent_fewer_than_limit() {
        let (conversations, messages) = repos();
        let conv = conversations.create("short").unwrap();
        messages.append(conv.id, "only one", Sender::User).unwrap();

        let recent = messages.recent(conv.id, 3).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].content, "only one");
    }

    #[test]
    fn test_recent_unknown_conversation_is_empty() {
        let (_, messages) = repos();
        assert!(messages.recent(Uuid::new_v4(), 3).unwrap().is_empty());
    }

    #[test]
    fn test_recent_zero_limit() {
        let (conversations, messages) = repos();
        let conv = conversations.create("zero").unwrap();
        messages.append(conv.id, "hello", Sender::User).unwrap();
        assert!(messages.recent(conv.id, 0).unwrap().is_empty());
    }
}
