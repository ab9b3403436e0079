//! Benchmarks for the classification pipeline.
//!
//! Measures the classifiers and the full rule-set evaluation on utterances
//! that stop at different priority levels, from the first rule (greeting)
//! to the last (clarification).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use parley_chat::{
    ConversationContext, KnowledgeBase, QuestionTypeClassifier, RuleInput, RuleSet,
    TopicClassifier, Utterance,
};

const UTTERANCES: &[(&str, &str)] = &[
    ("greeting", "hello there, how are you today?"),
    ("fast_path", "what is a database and why would I need one?"),
    ("topical", "who writes software for a living?"),
    (
        "clarification",
        "I was wondering whether you could recommend a good book for the weekend",
    ),
];

fn bench_classifiers(c: &mut Criterion) {
    let kb = KnowledgeBase::builtin();
    let questions = QuestionTypeClassifier::new(&kb);
    let topics = TopicClassifier::new(&kb);

    let mut group = c.benchmark_group("classifiers");
    for (name, text) in UTTERANCES {
        group.bench_function(format!("question_type/{}", name), |b| {
            b.iter(|| questions.classify(black_box(text)))
        });
        group.bench_function(format!("topic/{}", name), |b| {
            b.iter(|| topics.classify(black_box(text)))
        });
    }
    group.finish();
}

fn bench_rule_set(c: &mut Criterion) {
    let kb = KnowledgeBase::builtin();
    let rules = RuleSet::standard();
    let context = ConversationContext::default();

    let mut group = c.benchmark_group("rule_set");
    for (name, text) in UTTERANCES {
        group.bench_function(*name, |b| {
            b.iter(|| {
                let utterance = Utterance::new(black_box(text));
                let input = RuleInput {
                    utterance: &utterance,
                    knowledge: &kb,
                    hour: 10,
                    context: &context,
                };
                rules.evaluate(&input)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classifiers, bench_rule_set);
criterion_main!(benches);
