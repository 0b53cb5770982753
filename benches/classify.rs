//! Benchmarks for aerofuzz classification

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use aerofuzz::{AerofuzzConfig, Classifier};

fn build_benchmark(c: &mut Criterion) {
    c.bench_function("classifier_builtin", |b| {
        b.iter(|| black_box(Classifier::builtin().unwrap()));
    });

    c.bench_function("classifier_from_config", |b| {
        let config = AerofuzzConfig::builtin();
        b.iter(|| black_box(config.build_classifier().unwrap()));
    });
}

fn classify_benchmark(c: &mut Criterion) {
    let classifier = Classifier::builtin().unwrap();

    let mut group = c.benchmark_group("classify");

    for (label, altitude, speed) in [
        ("unique_best", 0.0, 0.0),
        ("four_way_tie", 3000.0, 400.0),
        ("out_of_range", -500.0, 2000.0),
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &(altitude, speed),
            |b, &(h, s)| {
                b.iter(|| {
                    let grid = classifier.classify(black_box(h), black_box(s)).unwrap();
                    black_box(grid.best_matches())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, build_benchmark, classify_benchmark);
criterion_main!(benches);
