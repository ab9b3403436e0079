//! The immutable rule data the classifiers and rules read from.
//!
//! A [`KnowledgeBase`] is built once at startup, optionally adjusted with the
//! `with_*` builders, then shared behind an `Arc` for the life of the process.

use std::fmt;

use crate::responses::TopicalResponseTable;

// =============================================================================
// Vocabulary
// =============================================================================

/// Social intents detected by unordered substring match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Greeting,
    Farewell,
    Gratitude,
}

/// Kind of question an utterance asks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuestionType {
    What,
    How,
    Who,
    When,
    Where,
}

impl QuestionType {
    pub const ALL: [QuestionType; 5] = [
        QuestionType::What,
        QuestionType::How,
        QuestionType::Who,
        QuestionType::When,
        QuestionType::Where,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::What => "what",
            QuestionType::How => "how",
            QuestionType::Who => "who",
            QuestionType::When => "when",
            QuestionType::Where => "where",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subject area an utterance concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    Programming,
    Database,
    Web,
    Ai,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Programming, Topic::Database, Topic::Web, Topic::Ai];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Programming => "programming",
            Topic::Database => "database",
            Topic::Web => "web",
            Topic::Ai => "ai",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// KnowledgeBase
// =============================================================================

/// Read-only rule data.
///
/// `question_patterns` and `topic_keywords` are ordered: classification is
/// first-match over the declared order, so ties cannot occur.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    greeting_phrases: Vec<String>,
    farewell_phrases: Vec<String>,
    gratitude_phrases: Vec<String>,
    question_patterns: Vec<(QuestionType, Vec<String>)>,
    topic_keywords: Vec<(Topic, Vec<String>)>,
    responses: TopicalResponseTable,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnowledgeBase {
    /// The stock rule base.
    pub fn builtin() -> Self {
        Self {
            greeting_phrases: owned(&[
                "hello",
                "hi",
                "hey",
                "good morning",
                "good afternoon",
                "good evening",
            ]),
            farewell_phrases: owned(&["bye", "goodbye", "see you", "take care"]),
            gratitude_phrases: owned(&["thanks", "thank you", "appreciate it"]),
            question_patterns: vec![
                (
                    QuestionType::What,
                    owned(&["what", "explain", "tell me about", "describe"]),
                ),
                (QuestionType::How, owned(&["how", "way to", "process of"])),
                (QuestionType::Who, owned(&["who"])),
                (QuestionType::When, owned(&["when", "time", "schedule"])),
                (QuestionType::Where, owned(&["where", "location", "place"])),
            ],
            topic_keywords: vec![
                (
                    Topic::Programming,
                    owned(&[
                        "javascript",
                        "python",
                        "java",
                        "coding",
                        "programming",
                        "developer",
                        "software",
                    ]),
                ),
                (
                    Topic::Database,
                    owned(&["database", "mysql", "sql", "data", "storage"]),
                ),
                (
                    Topic::Web,
                    owned(&[
                        "website",
                        "web development",
                        "frontend",
                        "backend",
                        "full stack",
                    ]),
                ),
                (
                    Topic::Ai,
                    owned(&[
                        "artificial intelligence",
                        "ai",
                        "machine learning",
                        "ml",
                        "deep learning",
                    ]),
                ),
            ],
            responses: TopicalResponseTable::builtin(),
        }
    }

    /// Replace the question-type patterns. Order is significant.
    pub fn with_question_patterns(mut self, patterns: Vec<(QuestionType, Vec<String>)>) -> Self {
        self.question_patterns = lowered_entries(patterns);
        self
    }

    /// Replace the topic keywords. Order is significant.
    pub fn with_topic_keywords(mut self, keywords: Vec<(Topic, Vec<String>)>) -> Self {
        self.topic_keywords = lowered_entries(keywords);
        self
    }

    /// Replace the topical response table.
    pub fn with_responses(mut self, responses: TopicalResponseTable) -> Self {
        self.responses = responses;
        self
    }

    pub fn phrases(&self, intent: Intent) -> &[String] {
        match intent {
            Intent::Greeting => &self.greeting_phrases,
            Intent::Farewell => &self.farewell_phrases,
            Intent::Gratitude => &self.gratitude_phrases,
        }
    }

    /// Whether any phrase of `intent` occurs in the already lower-cased text.
    pub fn matches_intent(&self, intent: Intent, lowered: &str) -> bool {
        self.phrases(intent)
            .iter()
            .any(|phrase| lowered.contains(phrase.as_str()))
    }

    pub fn question_patterns(&self) -> &[(QuestionType, Vec<String>)] {
        &self.question_patterns
    }

    pub fn topic_keywords(&self) -> &[(Topic, Vec<String>)] {
        &self.topic_keywords
    }

    pub fn responses(&self) -> &TopicalResponseTable {
        &self.responses
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn lowered_entries<K>(entries: Vec<(K, Vec<String>)>) -> Vec<(K, Vec<String>)> {
    entries
        .into_iter()
        .map(|(key, values)| (key, values.into_iter().map(|v| v.to_lowercase()).collect()))
        .collect()
}
