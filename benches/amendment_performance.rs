use amendlaw::core::classifier::classify;
use amendlaw::core::model::{Article, LawDocument, Paragraph};
use amendlaw::core::rules::{apply_rule, Particle};
use amendlaw::core::amend;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Builds a synthetic corpus of `n` laws, each with `articles_per_law`
/// articles, roughly a third of which mention the target word in a
/// variety of particle contexts.
fn synthetic_corpus(n: usize, articles_per_law: usize) -> Vec<LawDocument> {
    let bodies = [
        "지방법원을 둔다.",
        "지방법원의 관할구역은 대법원규칙으로 정한다.",
        "지방법원과 그 지원은 대법원장이 지정한다.",
        "지방법원이란 제1심 법원을 말한다.",
        "지방법원으로서 사무를 처리한다.",
        "서울고등법원에 계속된 사건을 이송한다.",
    ];

    (0..n)
        .map(|law_idx| {
            let articles = (0..articles_per_law)
                .map(|i| Article {
                    number: (i + 1) as u32,
                    branch_number: 0,
                    title: None,
                    content: String::new(),
                    paragraphs: vec![Paragraph {
                        number: 1,
                        content: bodies[i % bodies.len()].to_string(),
                        items: vec![],
                    }],
                    is_addendum: false,
                })
                .collect();
            LawDocument { name: format!("가나다법{law_idx}"), articles }
        })
        .collect()
}

/// Benchmark the full batch amendment pipeline across a growing corpus.
fn bench_amend_corpus(c: &mut Criterion) {
    let mut group = c.benchmark_group("amend_corpus");

    for law_count in [10, 100, 500] {
        let corpus = synthetic_corpus(law_count, 20);

        group.bench_with_input(BenchmarkId::new("laws", law_count), &corpus, |b, corpus| {
            b.iter(|| {
                let result = amend(black_box("지방법원"), black_box("지역법원"), corpus);
                black_box(result);
            });
        });
    }
    group.finish();
}

/// Benchmark the particle-decision rule engine in isolation, across all
/// twenty particle variants, to track per-sentence overhead separate
/// from tree-walking and aggregation.
fn bench_rule_engine(c: &mut Criterion) {
    let tails = ["을", "로서", "으로써", "이란", "는", "에서", "등의"];

    c.bench_function("apply_rule_all_particles", |b| {
        b.iter(|| {
            for tail in tails {
                let token = format!("지방법원{tail}");
                let classification = classify(black_box(&token), black_box("지방법원"));
                let particle = classification.particle.and_then(Particle::from_str);
                let out = apply_rule(
                    &classification.chunk,
                    "지역법원",
                    particle,
                    classification.suffix,
                );
                black_box(out);
            }
        });
    });
}

criterion_group!(benches, bench_amend_corpus, bench_rule_engine);
criterion_main!(benches);
