use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use kqlc::{extract_terms, translate, FormsOfMode};

const QUERIES: &[(&str, &str)] = &[
    ("single_term", "database"),
    ("spaced_term", "chef de projet"),
    ("boolean", "rust AND (tokio OR async-std) NOT blocking"),
    (
        "complex",
        "android AND (oracl* OR C++ OR C99) NOT iphone OR \"  hey  baby  *\" AND phone NEAR appl*",
    ),
    ("forgiving", ",a,,b, (c OR d’e),"),
];

fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate");

    for (name, query) in QUERIES {
        group.bench_with_input(BenchmarkId::new("both", name), query, |b, q| {
            b.iter(|| translate(black_box(q), FormsOfMode::Both).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("none", name), query, |b, q| {
            b.iter(|| translate(black_box(q), FormsOfMode::None).unwrap());
        });
    }

    group.finish();
}

fn bench_extract_terms(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_terms");

    for (name, query) in QUERIES {
        group.bench_with_input(BenchmarkId::from_parameter(name), query, |b, q| {
            b.iter(|| extract_terms(black_box(q)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_translate, bench_extract_terms);
criterion_main!(benches);
