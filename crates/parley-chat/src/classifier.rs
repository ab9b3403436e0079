//! Question-type and topic classifiers.
//!
//! Both are first-match over the knowledge base's declared order. Question
//! types match by token prefix, topics by substring of the whole utterance.

use crate::knowledge::{KnowledgeBase, QuestionType, Topic};
use crate::tokenizer::Utterance;

/// Detects which question type, if any, an utterance expresses.
pub struct QuestionTypeClassifier<'kb> {
    patterns: &'kb [(QuestionType, Vec<String>)],
}

impl<'kb> QuestionTypeClassifier<'kb> {
    pub fn new(knowledge: &'kb KnowledgeBase) -> Self {
        Self {
            patterns: knowledge.question_patterns(),
        }
    }

    pub fn classify(&self, utterance: &str) -> Option<QuestionType> {
        self.classify_utterance(&Utterance::new(utterance))
    }

    /// The first declared type with a pattern that prefixes any token.
    ///
    /// "how" matches "however"; multi-word patterns never match a single
    /// token.
    pub fn classify_utterance(&self, utterance: &Utterance<'_>) -> Option<QuestionType> {
        self.patterns
            .iter()
            .find(|(_, prefixes)| {
                prefixes
                    .iter()
                    .any(|prefix| utterance.tokens().any(|token| token.starts_with(prefix.as_str())))
            })
            .map(|(question, _)| *question)
    }
}

/// Detects which topic, if any, an utterance concerns.
pub struct TopicClassifier<'kb> {
    keywords: &'kb [(Topic, Vec<String>)],
}

impl<'kb> TopicClassifier<'kb> {
    pub fn new(knowledge: &'kb KnowledgeBase) -> Self {
        Self {
            keywords: knowledge.topic_keywords(),
        }
    }

    pub fn classify(&self, utterance: &str) -> Option<Topic> {
        self.classify_utterance(&Utterance::new(utterance))
    }

    /// The first declared topic with a keyword anywhere in the utterance.
    pub fn classify_utterance(&self, utterance: &Utterance<'_>) -> Option<Topic> {
        self.keywords
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| utterance.contains(k)))
            .map(|(topic, _)| *topic)
    }
}
