/// Benchmarks for the request parsing and result normalization on the hot path
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use paraph_shared::{normalize, ParaphraseRequest};
use serde_json::json;

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Normalize");

    let grouped = json!((0..20)
        .map(|i| (0..5).map(|j| format!("Sentence {i}, variant {j}.")).collect::<Vec<_>>())
        .collect::<Vec<_>>());
    let flat = json!((0..50).map(|i| format!("Variant {i}.")).collect::<Vec<_>>());
    let unknown = json!({ "message": "unexpected", "items": [1, 2, 3] });

    group.bench_function("grouped", |b| b.iter(|| normalize(black_box(&grouped))));
    group.bench_function("flat", |b| b.iter(|| normalize(black_box(&flat))));
    group.bench_function("unknown", |b| b.iter(|| normalize(black_box(&unknown))));

    group.finish();
}

fn bench_parse_request(c: &mut Criterion) {
    let body = json!({
        "text": "The quick brown fox jumps over the lazy dog. ".repeat(40),
        "resultType": "multiple"
    })
    .to_string();

    c.bench_function("parse_request_body", |b| {
        b.iter(|| ParaphraseRequest::from_body(black_box(body.as_bytes())))
    });
}

criterion_group!(benches, bench_normalize, bench_parse_request);
criterion_main!(benches);
