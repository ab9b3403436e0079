//! Priority-ordered reply rules.
//!
//! A [`RuleSet`] is an ordered list of matchers. The first matcher that
//! returns a reply wins; the standard set ends with a clarification rule
//! that always replies.

use std::fmt;

use crate::classifier::{QuestionTypeClassifier, TopicClassifier};
use crate::context::ConversationContext;
use crate::knowledge::{Intent, KnowledgeBase};
use crate::responses;
use crate::tokenizer::Utterance;

const PROGRAMMING_TERMS: &[&str] = &["programming", "coding"];
const DATABASE_TERMS: &[&str] = &["database", "mysql"];
const WEB_TERMS: &[&str] = &["web", "website"];
const AI_TERMS: &[&str] = &["ai", "artificial intelligence"];

/// Everything a rule may look at for one reply.
pub struct RuleInput<'a> {
    pub utterance: &'a Utterance<'a>,
    pub knowledge: &'a KnowledgeBase,
    /// Local hour of day, read once per reply.
    pub hour: u32,
    /// Recent conversation history. No standard rule consults it.
    pub context: &'a ConversationContext,
}

/// Which rule produced a reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Greeting,
    Farewell,
    Gratitude,
    LearnProgramming,
    ProgrammingLanguages,
    DatabaseDefinition,
    DatabaseHowTo,
    Frontend,
    Backend,
    ArtificialIntelligence,
    Topical,
    Clarification,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Greeting => "greeting",
            RuleKind::Farewell => "farewell",
            RuleKind::Gratitude => "gratitude",
            RuleKind::LearnProgramming => "learn_programming",
            RuleKind::ProgrammingLanguages => "programming_languages",
            RuleKind::DatabaseDefinition => "database_definition",
            RuleKind::DatabaseHowTo => "database_how_to",
            RuleKind::Frontend => "frontend",
            RuleKind::Backend => "backend",
            RuleKind::ArtificialIntelligence => "artificial_intelligence",
            RuleKind::Topical => "topical",
            RuleKind::Clarification => "clarification",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produces a reply when the rule applies, `None` otherwise.
pub type Matcher = fn(&RuleInput<'_>) -> Option<String>;

/// One entry of the decision table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub kind: RuleKind,
    pub matcher: Matcher,
}

impl Rule {
    pub const fn new(kind: RuleKind, matcher: Matcher) -> Self {
        Self { kind, matcher }
    }

    /// Reply for `input`, if this rule applies to it.
    pub fn apply(&self, input: &RuleInput<'_>) -> Option<String> {
        (self.matcher)(input)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("kind", &self.kind).finish()
    }
}

/// Ordered rules, evaluated top to bottom.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Social intents, then domain fast paths, then the topical table,
    /// then clarification.
    pub fn standard() -> Self {
        Self::new(vec![
            Rule::new(RuleKind::Greeting, |i| {
                is_intent(i, Intent::Greeting).then(|| responses::greeting(i.hour))
            }),
            Rule::new(RuleKind::Farewell, |i| {
                is_intent(i, Intent::Farewell).then(|| responses::FAREWELL.to_string())
            }),
            Rule::new(RuleKind::Gratitude, |i| {
                is_intent(i, Intent::Gratitude).then(|| responses::GRATITUDE.to_string())
            }),
            Rule::new(RuleKind::LearnProgramming, |i| {
                fast_path(i, PROGRAMMING_TERMS, "learn", responses::LEARN_PROGRAMMING)
            }),
            Rule::new(RuleKind::ProgrammingLanguages, |i| {
                fast_path(i, PROGRAMMING_TERMS, "language", responses::PROGRAMMING_LANGUAGES)
            }),
            Rule::new(RuleKind::DatabaseDefinition, |i| {
                fast_path(i, DATABASE_TERMS, "what", responses::DATABASE_DEFINITION)
            }),
            Rule::new(RuleKind::DatabaseHowTo, |i| {
                fast_path(i, DATABASE_TERMS, "how", responses::DATABASE_HOWTO)
            }),
            Rule::new(RuleKind::Frontend, |i| {
                fast_path(i, WEB_TERMS, "frontend", responses::FRONTEND_OVERVIEW)
            }),
            Rule::new(RuleKind::Backend, |i| {
                fast_path(i, WEB_TERMS, "backend", responses::BACKEND_OVERVIEW)
            }),
            Rule::new(RuleKind::ArtificialIntelligence, |i| {
                i.utterance
                    .contains_any(AI_TERMS)
                    .then(|| responses::AI_OVERVIEW.to_string())
            }),
            Rule::new(RuleKind::Topical, topical),
            Rule::new(RuleKind::Clarification, |i| Some(clarify(i))),
        ])
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Run the rules in order and return the first reply.
    ///
    /// A rule set without a catch-all still never fails: an unmatched input
    /// gets the clarification reply.
    pub fn evaluate(&self, input: &RuleInput<'_>) -> (RuleKind, String) {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(input).map(|text| (rule.kind, text)))
            .unwrap_or_else(|| (RuleKind::Clarification, clarify(input)))
    }
}

// =============================================================================
// Matchers
// =============================================================================

fn is_intent(input: &RuleInput<'_>, intent: Intent) -> bool {
    input
        .knowledge
        .matches_intent(intent, input.utterance.lowered())
}

fn fast_path(
    input: &RuleInput<'_>,
    terms: &[&str],
    keyword: &str,
    reply: &'static str,
) -> Option<String> {
    (input.utterance.contains_any(terms) && input.utterance.contains(keyword))
        .then(|| reply.to_string())
}

/// Both classifiers must answer; each runs once.
fn topical(input: &RuleInput<'_>) -> Option<String> {
    let question =
        QuestionTypeClassifier::new(input.knowledge).classify_utterance(input.utterance)?;
    let topic = TopicClassifier::new(input.knowledge).classify_utterance(input.utterance)?;
    Some(input.knowledge.responses().respond(topic, question))
}

fn clarify(input: &RuleInput<'_>) -> String {
    responses::clarification(input.utterance.raw())
}
