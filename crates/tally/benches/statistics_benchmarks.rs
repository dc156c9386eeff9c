//! Statistics engine benchmarks.
//!
//! Measures ingestion and each statistic across table sizes.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tally::config::{DataFileConfig, DataFormat, Orientation};
use tally::{MemoryReporter, StatisticsEngine, Table, TableReader};

const ORIGINS: &[&str] = &["USA", "Europe", "Japan"];

/// Generate a synthetic cars CSV with the given number of rows.
fn generate_cars_csv(rows: usize) -> String {
    let mut data = String::from("Name,Horsepower,Origin,Year\n");
    for row in 0..rows {
        data.push_str(&format!(
            "car_{:06},{},{},{}-{:02}-{:02}\n",
            row,
            40 + (row * 37) % 200,
            ORIGINS[row % ORIGINS.len()],
            1970 + row % 12,
            (row % 12) + 1,
            (row % 28) + 1,
        ));
    }
    data
}

fn read_table(data: &str) -> Table {
    TableReader::new()
        .read_bytes(data.as_bytes(), DataFormat::Csv, Orientation::Records)
        .unwrap()
}

fn config() -> DataFileConfig {
    DataFileConfig {
        file_name: "cars".to_string(),
        file_path: ".".into(),
        file_type: DataFormat::Csv,
        orientation: Orientation::Records,
        columns: Vec::new(),
        date_format: "%Y-%m-%d".to_string(),
    }
}

/// Benchmark CSV ingestion.
fn bench_read_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_csv");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_cars_csv(*rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| black_box(read_table(data)))
        });
    }

    group.finish();
}

/// Benchmark the aggregates that leave the table untouched.
fn bench_aggregates(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregates");
    let config = config();
    let reporter = MemoryReporter::new();
    let engine = StatisticsEngine::new("cars", &config, &reporter);

    for rows in [1_000, 10_000].iter() {
        let table = read_table(&generate_cars_csv(*rows));
        group.throughput(Throughput::Elements(*rows as u64));

        group.bench_with_input(BenchmarkId::new("unique_number", rows), &table, |b, t| {
            b.iter(|| black_box(engine.unique_number(t, "Origin").unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("average", rows), &table, |b, t| {
            b.iter(|| black_box(engine.average(t, "Horsepower").unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("top_max", rows), &table, |b, t| {
            b.iter(|| black_box(engine.top_max(t, "Horsepower", "Name", 10).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("count_by_value", rows), &table, |b, t| {
            b.iter(|| black_box(engine.count_by_value(t, "Origin").unwrap()))
        });
        reporter.clear();
    }

    group.finish();
}

/// Benchmark date parsing and year derivation.
fn bench_count_by_year(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_by_year");
    let config = config();
    let reporter = MemoryReporter::new();
    let engine = StatisticsEngine::new("cars", &config, &reporter);

    for rows in [1_000, 10_000].iter() {
        let table = read_table(&generate_cars_csv(*rows));
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, t| {
            b.iter_with_setup(
                || t.clone(),
                |mut table| black_box(engine.count_by_year(&mut table, "Year").unwrap()),
            )
        });
        reporter.clear();
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_read_csv,
    bench_aggregates,
    bench_count_by_year,
);
criterion_main!(benches);
