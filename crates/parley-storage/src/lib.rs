//! Parley Storage crate - SQLite persistence for conversations and messages.
//!
//! Provides a WAL-mode SQLite database with migrations and the repositories
//! the HTTP layer and the response engine's context retriever read from.

pub mod db;
pub mod migrations;
pub mod repository;

pub use db::Database;
pub use repository::{ConversationRepository, MessageRepository};
