//! Benchmarks for rule classification and baseline composition.
//!
//! Classification is on the path of every turn, so the fallback case (a walk
//! over the entire table) is measured separately.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use spu_chat::{IntentClassifier, ResponseComposer};
use spu_core::KnowledgeBase;

fn bench_classify(c: &mut Criterion) {
    let classifier = IntentClassifier::new();
    let inputs = [
        "hello",
        "What services do you offer?",
        "Do you work with Booking.com?",
        "digital transformation",
        "xyzzy plugh",
    ];

    c.bench_function("classify_mixed", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(classifier.classify(black_box(input)));
            }
        })
    });

    // Worst case: every rule is tested before the fallback.
    c.bench_function("classify_fallback", |b| {
        b.iter(|| black_box(classifier.classify(black_box("nothing to see here at all"))))
    });
}

fn bench_compose(c: &mut Criterion) {
    let classifier = IntentClassifier::new();
    let composer = ResponseComposer::new();
    let kb = KnowledgeBase::revx();
    let rule = classifier.classify("contact").rule;

    c.bench_function("compose_contact", |b| {
        b.iter(|| black_box(composer.compose_at(rule, &kb, 10)))
    });
}

criterion_group!(benches, bench_classify, bench_compose);
criterion_main!(benches);
