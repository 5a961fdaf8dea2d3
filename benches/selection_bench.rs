//! Benchmarks for the selection controller
//!
//! Run with: cargo bench

use chrono::{Duration, NaiveDate};
use covidash::dataset::{Dataset, RawTable, Record};
use covidash::view::{filter_by_region, on_selection_changed};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const STATES: [&str; 27] = [
    "AC", "AL", "AM", "AP", "BA", "CE", "DF", "ES", "GO", "MA", "MG", "MS", "MT", "PA", "PB",
    "PE", "PI", "PR", "RJ", "RN", "RO", "RR", "RS", "SC", "SE", "SP", "TO",
];

/// One record per state per day, the last day flagged as latest
fn create_dataset(days: i64) -> Dataset {
    let start = NaiveDate::from_ymd_opt(2020, 2, 25).unwrap();
    let mut records = Vec::with_capacity(STATES.len() * days as usize);

    for day in 0..days {
        let date = start + Duration::days(day);
        for (i, state) in STATES.iter().enumerate() {
            let confirmed = (day as u64 + 1) * (i as u64 + 1) * 10;
            records.push(
                Record::new(*state, date)
                    .confirmed(confirmed)
                    .deaths(confirmed / 50)
                    .latest(day == days - 1),
            );
        }
    }

    Dataset::from_records(records)
}

fn create_raw_table(days: i64) -> RawTable {
    let start = NaiveDate::from_ymd_opt(2020, 2, 25).unwrap();
    let headers = ["date", "state", "city", "place_type", "confirmed", "deaths", "is_last"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows = Vec::new();
    for day in 0..days {
        let date = (start + Duration::days(day)).format("%Y-%m-%d").to_string();
        for state in STATES {
            rows.push(vec![
                date.clone(),
                state.to_string(),
                String::new(),
                "state".to_string(),
                (day * 10).to_string(),
                day.to_string(),
                if day == days - 1 { "True" } else { "False" }.to_string(),
            ]);
        }
    }

    RawTable::new(headers, rows)
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");

    for days in [30, 365, 1000] {
        let dataset = create_dataset(days);
        group.throughput(Throughput::Elements(dataset.len() as u64));

        group.bench_function(format!("filter_{}d", days), |b| {
            b.iter(|| filter_by_region(black_box(&dataset), black_box("SP")))
        });

        group.bench_function(format!("on_selection_changed_{}d", days), |b| {
            b.iter(|| on_selection_changed(black_box(&dataset), black_box("SP")))
        });

        group.bench_function(format!("unknown_region_{}d", days), |b| {
            b.iter(|| on_selection_changed(black_box(&dataset), black_box("XX")))
        });
    }

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for days in [30, 365] {
        let raw = create_raw_table(days);
        group.throughput(Throughput::Elements(raw.rows.len() as u64));

        group.bench_function(format!("load_{}d", days), |b| {
            b.iter(|| Dataset::load(black_box(raw.clone())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_selection, bench_load);
criterion_main!(benches);
