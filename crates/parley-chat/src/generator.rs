//! Response generator: fetches context, then runs the rule set.

use std::sync::Arc;

use tracing::debug;

use parley_core::types::ConversationId;

use crate::clock::{Clock, SystemClock};
use crate::context::{ContextRetriever, ConversationContext};
use crate::error::ChatError;
use crate::knowledge::KnowledgeBase;
use crate::rules::{RuleInput, RuleKind, RuleSet};
use crate::tokenizer::Utterance;

/// Default number of prior messages fetched per reply.
pub const DEFAULT_CONTEXT_WINDOW: usize = 3;

/// A generated reply and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub rule: RuleKind,
}

/// Produces replies for utterances in a conversation.
///
/// Holds no mutable state; concurrent calls need no coordination.
pub struct ResponseGenerator {
    knowledge: Arc<KnowledgeBase>,
    rules: RuleSet,
    retriever: Arc<dyn ContextRetriever>,
    clock: Arc<dyn Clock>,
    context_window: usize,
}

impl ResponseGenerator {
    pub fn new(knowledge: Arc<KnowledgeBase>, retriever: Arc<dyn ContextRetriever>) -> Self {
        Self {
            knowledge,
            rules: RuleSet::standard(),
            retriever,
            clock: Arc::new(SystemClock),
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_context_window(mut self, context_window: usize) -> Self {
        self.context_window = context_window;
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Reply text for `utterance`.
    ///
    /// Never fails for lack of a match. Fails only when the context fetch
    /// fails, in which case no text is produced.
    pub async fn generate(
        &self,
        utterance: &str,
        conversation_id: ConversationId,
    ) -> Result<String, ChatError> {
        Ok(self.generate_reply(utterance, conversation_id).await?.text)
    }

    /// Like [`ResponseGenerator::generate`], also naming the rule that fired.
    pub async fn generate_reply(
        &self,
        utterance: &str,
        conversation_id: ConversationId,
    ) -> Result<Reply, ChatError> {
        let context =
            ConversationContext::fetch(self.retriever.as_ref(), conversation_id, self.context_window)
                .await?;
        debug!(
            conversation_id = %conversation_id,
            messages = context.len(),
            "Conversation context fetched"
        );

        let utterance = Utterance::new(utterance);
        let input = RuleInput {
            utterance: &utterance,
            knowledge: &self.knowledge,
            hour: self.clock.hour(),
            context: &context,
        };
        let (rule, text) = self.rules.evaluate(&input);
        debug!(conversation_id = %conversation_id, rule = %rule, "Reply generated");

        Ok(Reply { text, rule })
    }
}
