//! Benchmarks for slangshift preprocessing and translation.
//!
//! Run with: cargo bench
//!
//! Inputs are synthetic sentences with contractions, elongations and emoji.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use slangshift::{PreprocessOptions, Preprocessor, TextRecord};

const WORDS: &[&str] = &[
    "I'm", "can't", "sooooo", "happy", "please", "wait", "a", "moment", "we're", "gonna",
    "Thank", "you", "for", "your", "help", "❤️", "😂", "yesss", "okay!!!", "they've",
];

/// Creates `count` random sentences of 6 to 14 words.
fn create_sentences(count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|i| {
            let len = 6 + i % 9;
            (0..len)
                .map(|_| *WORDS.choose(&mut rng).unwrap_or(&"word"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn create_records(count: usize) -> Vec<TextRecord> {
    let formal = create_sentences(count);
    let informal = create_sentences(count + 1);
    formal
        .into_iter()
        .zip(informal.into_iter().skip(1))
        .map(|(f, i)| TextRecord::new(f, i))
        .collect()
}

/// Benchmark single-text preprocessing with each preset.
fn bench_presets(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocess_text");
    let sentences = create_sentences(100);

    let presets = [
        ("minimal", PreprocessOptions::minimal()),
        ("light", PreprocessOptions::light()),
        ("standard", PreprocessOptions::standard()),
    ];

    for (name, options) in presets {
        let preprocessor = Preprocessor::new(options);
        group.bench_with_input(BenchmarkId::new("preset", name), &sentences, |b, sentences| {
            b.iter(|| {
                for sentence in sentences {
                    black_box(preprocessor.process(black_box(sentence)));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark dataset cleaning, sequential versus parallel.
fn bench_clean_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean_records");

    for row_count in [100, 1000, 10000].iter() {
        let records = create_records(*row_count);
        group.throughput(Throughput::Elements(*row_count as u64));

        let sequential = Preprocessor::new(PreprocessOptions::standard().sequential());
        group.bench_with_input(BenchmarkId::new("sequential", row_count), &records, |b, rows| {
            b.iter(|| sequential.clean_records(black_box(rows)));
        });

        let parallel = Preprocessor::new(PreprocessOptions::standard());
        group.bench_with_input(BenchmarkId::new("parallel", row_count), &records, |b, rows| {
            b.iter(|| parallel.clean_records(black_box(rows)));
        });
    }

    group.finish();
}

/// Benchmark rule-based translation.
fn bench_translate(c: &mut Criterion) {
    c.bench_function("translate_exact", |b| {
        b.iter(|| slangshift::translate(black_box("Please wait a moment")));
    });

    c.bench_function("translate_phrase", |b| {
        b.iter(|| {
            slangshift::translate(black_box("I would like to request your assistance please"))
        });
    });

    c.bench_function("translate_fallback", |b| {
        b.iter(|| slangshift::translate(black_box("The weather is lovely this afternoon")));
    });
}

criterion_group!(benches, bench_presets, bench_clean_records, bench_translate);
criterion_main!(benches);
