//! Application state shared across all route handlers.
//!
//! AppState holds references to the repositories and the response engine.
//! It is passed to handlers via axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use parley_chat::{KnowledgeBase, ResponseGenerator};
use parley_core::config::ParleyConfig;
use parley_storage::{ConversationRepository, Database, MessageRepository};

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration (read-only after startup).
    pub config: Arc<ParleyConfig>,
    /// SQLite database; read directly only by the health check.
    pub database: Arc<Database>,
    pub conversations: ConversationRepository,
    pub messages: MessageRepository,
    /// Response engine; its context retriever reads from `messages`.
    pub generator: Arc<ResponseGenerator>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Wire the repositories and a generator backed by the same database.
    pub fn new(config: ParleyConfig, database: Database, knowledge: Arc<KnowledgeBase>) -> Self {
        let database = Arc::new(database);
        let messages = MessageRepository::new(Arc::clone(&database));
        let generator = ResponseGenerator::new(knowledge, Arc::new(messages.clone()))
            .with_context_window(config.chat.context_window);
        Self::with_generator(config, database, generator)
    }

    /// Use a caller-built generator (custom clock, retriever, or rules).
    pub fn with_generator(
        config: ParleyConfig,
        database: Arc<Database>,
        generator: ResponseGenerator,
    ) -> Self {
        Self {
            config: Arc::new(config),
            conversations: ConversationRepository::new(Arc::clone(&database)),
            messages: MessageRepository::new(Arc::clone(&database)),
            database,
            generator: Arc::new(generator),
            start_time: Instant::now(),
        }
    }
}
