//! Performance benchmarks for the Hifz Engine.
//!
//! Covers the two hot paths of a dashboard refresh:
//! - Coverage over a user's full log history (engine and HTTP round trip)
//! - Yearly completion rates over a year of daily rows
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use hifz_engine::api::{AppState, create_router};
use hifz_engine::calculation::{CompletionRows, compute_coverage_report, compute_rate};
use hifz_engine::config::ConfigLoader;
use hifz_engine::models::{DailyCompletion, LogEntry, PeriodKind, Program};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/quran").expect("Failed to load config")
}

/// Builds `count` overlapping entries spread across every surah and program.
fn create_entries(config: &ConfigLoader, count: usize) -> Vec<LogEntry> {
    let base = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
    let surahs = config.surahs();

    (0..count)
        .map(|i| {
            let surah = &surahs[i % surahs.len()];
            let start = (i as u16 % surah.total_verses) + 1;
            let end = (start + 9).min(surah.total_verses);
            LogEntry::new(
                format!("entry_{:05}", i),
                "bench_user",
                Program::ALL[i % Program::ALL.len()],
                surah.number,
                start,
                end,
                base + Days::new((i % 365) as u64),
            )
        })
        .collect()
}

/// Benchmark: coverage report computed directly, scaling with history size.
fn bench_coverage_scaling(c: &mut Criterion) {
    let config = load_config();
    let mut group = c.benchmark_group("coverage_report");

    for entry_count in [100usize, 1_000, 10_000] {
        let entries = create_entries(&config, entry_count);

        group.throughput(Throughput::Elements(entry_count as u64));
        group.bench_with_input(
            BenchmarkId::new("entries", entry_count),
            &entries,
            |b, entries| {
                b.iter(|| {
                    black_box(compute_coverage_report(
                        "bench_user",
                        &Program::ALL,
                        config.surahs(),
                        config.collections(),
                        entries,
                    ))
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: POST /coverage with 1000 entries, including JSON handling.
fn bench_coverage_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = load_config();
    let entries = create_entries(&config, 1_000);
    let router = create_router(AppState::new(config));

    let body = serde_json::to_string(&serde_json::json!({
        "viewer": { "user_id": "bench_user" },
        "owner": { "user_id": "bench_user" },
        "entries": entries
    }))
    .unwrap();

    c.bench_function("coverage_endpoint_1000", |b| {
        b.to_async(&rt).iter(|| async {
            let response = router
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/coverage")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: yearly rate over one row per program per day.
fn bench_yearly_rate(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let daily: Vec<DailyCompletion> = (0..365u64)
        .flat_map(|offset| {
            Program::ALL.into_iter().map(move |program| DailyCompletion {
                owner_id: "bench_user".to_string(),
                program,
                date: start + Days::new(offset),
                completed: offset % 3 != 0,
            })
        })
        .collect();
    let rows = CompletionRows {
        daily: &daily,
        ..CompletionRows::default()
    };
    let today = NaiveDate::from_ymd_opt(2027, 1, 15).unwrap();

    let mut group = c.benchmark_group("rates");
    group.throughput(Throughput::Elements(daily.len() as u64));

    group.bench_function("year_all_programs", |b| {
        b.iter(|| {
            black_box(compute_rate(
                "bench_user",
                PeriodKind::Year,
                start,
                today,
                &Program::ALL,
                &[],
                &rows,
            ))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_coverage_scaling,
    bench_coverage_endpoint,
    bench_yearly_rate,
);
criterion_main!(benches);
