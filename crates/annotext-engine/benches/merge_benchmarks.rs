//! Merge pipeline benchmarks
//!
//! Run with: cargo bench -p annotext-engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use annotext_classifiers::{
    AnnotatorConfig, Candidate, CandidateSource, ConstantScorer, LexiconTokenizer,
};
use annotext_core::{KnowledgeSnapshot, Label, Span};
use annotext_engine::{AnnotationPipeline, SpanMerger};

const SENTENCE: &str = "张三去了北京，天气很好。2024年3月15日，李四在清华大学举行会议，明天去上海。";

fn knowledge(size: usize) -> KnowledgeSnapshot {
    let mut pairs: Vec<(String, Label)> = (0..size)
        .map(|i| (format!("实体{i}"), Label::Organization))
        .collect();
    pairs.push(("清华大学".to_string(), Label::Organization));
    pairs.push(("北京".to_string(), Label::Place));
    KnowledgeSnapshot::from_pairs(pairs)
}

/// Full annotate run over growing documents
fn benchmark_annotate(c: &mut Criterion) {
    let pipeline = AnnotationPipeline::new(
        &AnnotatorConfig::default(),
        Arc::new(LexiconTokenizer::builtin().expect("Failed to build tokenizer")),
        Arc::new(ConstantScorer::new(0.7)),
    )
    .expect("Failed to create pipeline");
    let snapshot = knowledge(50);

    let mut group = c.benchmark_group("Annotate");
    group.sample_size(50);

    for repeat in [1usize, 10, 100] {
        let text = SENTENCE.repeat(repeat);
        group.bench_with_input(BenchmarkId::new("sentences", repeat), &text, |b, text| {
            b.iter(|| pipeline.annotate(black_box(text), black_box(&snapshot)))
        });
    }

    group.finish();
}

/// Interval index under many overlapping offers
fn benchmark_merger(c: &mut Criterion) {
    let mut group = c.benchmark_group("Span_Merger");

    for count in [100usize, 1_000, 10_000] {
        let candidates: Vec<Candidate> = (0..count)
            .map(|i| {
                let start = (i * 7919) % (count * 2);
                Candidate::new(
                    Span::new(start, start + 1 + i % 5, Label::Person),
                    "x",
                    CandidateSource::Knowledge,
                )
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("offer", count), &candidates, |b, candidates| {
            b.iter(|| {
                let mut merger = SpanMerger::new();
                merger.offer_all(black_box(candidates.iter().cloned()));
                merger.finish()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_annotate, benchmark_merger);
criterion_main!(benches);
