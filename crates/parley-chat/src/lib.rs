//! Rule-based conversational response engine for Parley.
//!
//! Classifies an utterance against a fixed knowledge base (greetings,
//! farewells, gratitude, question types, topics) and selects a canned or
//! templated reply through an ordered rule set.

pub mod classifier;
pub mod clock;
pub mod context;
pub mod error;
pub mod generator;
pub mod knowledge;
pub mod responses;
pub mod rules;
pub mod tokenizer;

pub use classifier::{QuestionTypeClassifier, TopicClassifier};
pub use clock::{Clock, FixedClock, SystemClock};
pub use context::{ContextRetriever, ConversationContext};
pub use error::ChatError;
pub use generator::{Reply, ResponseGenerator};
pub use knowledge::{Intent, KnowledgeBase, QuestionType, Topic};
pub use responses::TopicalResponseTable;
pub use rules::{Rule, RuleInput, RuleKind, RuleSet};
pub use tokenizer::Utterance;
