use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nova_core::{
    aggregate::{category_breakdown, filter_transactions, monthly_trend, summarize},
    predict, DashboardQuery, DashboardView,
};
use nova_domain::{Category, FilterRange, Transaction, TransactionKind};

const DESCRIPTIONS: [&str; 8] = [
    "Rent", "Phone", "Groceries", "Coffee", "Gym", "Internet", "Fuel", "Cinema",
];

fn build_sample_collection(txn_count: usize) -> Vec<Transaction> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    (0..txn_count)
        .map(|idx| {
            let kind = if idx % 10 == 0 {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            Transaction::new(
                kind,
                10.0 + (idx % 250) as f64,
                DESCRIPTIONS[idx % DESCRIPTIONS.len()],
                Category::ALL[idx % Category::ALL.len()],
                start + Duration::days((idx % 540) as i64),
                created_at,
            )
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let transactions = build_sample_collection(black_box(10_000));
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();

    c.bench_function("filter_and_summarize_10k", |b| {
        b.iter(|| {
            let filtered = filter_transactions(&transactions, FilterRange::Year, "rent", now);
            black_box(summarize(filtered.iter().copied()));
            black_box(category_breakdown(filtered.iter().copied()));
        })
    });

    c.bench_function("monthly_trend_10k", |b| {
        b.iter(|| black_box(monthly_trend(&transactions, now)))
    });

    c.bench_function("dashboard_view_10k", |b| {
        let query = DashboardQuery::new(FilterRange::Month);
        b.iter(|| black_box(DashboardView::compute(&transactions, &query, now)))
    });
}

fn bench_prediction(c: &mut Criterion) {
    let transactions = build_sample_collection(black_box(10_000));
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();

    c.bench_function("predict_10k", |b| {
        b.iter(|| black_box(predict(&transactions, now)))
    });
}

criterion_group!(benches, bench_aggregation, bench_prediction);
criterion_main!(benches);
