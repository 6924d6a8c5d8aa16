//! Pipeline performance benchmarks.
//!
//! Measures ingestion and the cleaning stages across dataset sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scrub::{CleaningOptions, Parser, Pipeline};

const NAMES: &[&str] = &["Alice", " bob ", "Carol", "DAVE", "eve", "Frank"];

/// Generate a CSV with names, ages, scores and dates, some values missing,
/// some duplicated and a few outliers.
fn generate_csv_data(rows: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = String::from("Full Name,Age,Score,Join Date\n");

    for _ in 0..rows {
        let name = NAMES[rng.gen_range(0..NAMES.len())];
        let age = match rng.gen_range(0..20) {
            0 => String::new(),
            1 => "950".to_string(),
            _ => rng.gen_range(18..80).to_string(),
        };
        let score = format!("{:.2}", rng.gen_range(0.0..100.0));
        let date = format!(
            "{}-{:02}-{:02}",
            rng.gen_range(2000..2025),
            rng.gen_range(1..13),
            rng.gen_range(1..29)
        );
        data.push_str(&format!("{},{},{},{}\n", name, age, score, date));
    }

    data
}

/// Benchmark ingestion of uploaded bytes.
fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_csv_data(*rows, 42);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            let parser = Parser::new();
            b.iter(|| black_box(parser.parse_upload("bench.csv", data.as_bytes()).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark the full pipeline with every stage enabled.
fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");

    for rows in [100, 1_000, 10_000].iter() {
        let (dataset, _) = Parser::new()
            .parse_upload("bench.csv", generate_csv_data(*rows, 7).as_bytes())
            .unwrap();

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &dataset, |b, dataset| {
            let pipeline = Pipeline::new();
            let options = CleaningOptions::all();
            b.iter(|| black_box(pipeline.run(dataset, &options).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark single stages on the same 10k-row dataset.
fn bench_single_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_stage");

    let (dataset, _) = Parser::new()
        .parse_upload("bench.csv", generate_csv_data(10_000, 3).as_bytes())
        .unwrap();
    let pipeline = Pipeline::new();

    let stages: [(&str, CleaningOptions); 5] = [
        (
            "dedup",
            CleaningOptions {
                drop_duplicates: true,
                ..CleaningOptions::default()
            },
        ),
        (
            "normalize",
            CleaningOptions {
                standardize_columns: true,
                ..CleaningOptions::default()
            },
        ),
        (
            "impute",
            CleaningOptions {
                handle_missing: true,
                ..CleaningOptions::default()
            },
        ),
        (
            "convert",
            CleaningOptions {
                convert_types: true,
                ..CleaningOptions::default()
            },
        ),
        (
            "outliers",
            CleaningOptions {
                remove_outliers: true,
                ..CleaningOptions::default()
            },
        ),
    ];

    for (name, options) in stages.iter() {
        group.bench_with_input(BenchmarkId::new("stage", name), options, |b, options| {
            b.iter(|| black_box(pipeline.run(&dataset, options).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ingest, bench_full_pipeline, bench_single_stages);
criterion_main!(benches);
