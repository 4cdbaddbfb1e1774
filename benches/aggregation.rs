use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::tempdir;
use together_core::core::aggregation::{AggregationEngine, LedgerSnapshot, ReportFilter};
use together_core::core::time::DateRange;
use together_core::domain::{Category, Group, InviteCode, Member, Transaction, TransactionType};
use together_core::format::Locale;
use together_core::storage::{JsonStore, StoreSnapshot, StoredMember, SNAPSHOT_SCHEMA_VERSION};

fn build_sample_snapshot(txn_count: usize) -> LedgerSnapshot {
    let group = Group::new("Benchmark", InviteCode::parse("BENCH1").expect("invite code"));
    let members = vec![
        Member::new(group.id, "Husband", "H"),
        Member::new(group.id, "Wife", "W"),
    ];
    let categories: Vec<Category> = ["food", "transport", "shopping", "cafe", "salary"]
        .iter()
        .map(|name| Category::new(*name, "#9ca3af"))
        .collect();

    let start_date = NaiveDate::from_ymd_opt(2025, 1, 1).expect("start date");
    let transactions = (0..txn_count)
        .map(|idx| {
            let kind = TransactionType::ALL[idx % 7 % 4];
            Transaction::new(
                group.id,
                members[idx % members.len()].id,
                categories[idx % categories.len()].id,
                kind,
                start_date + Duration::days((idx % 365) as i64),
                1_000 + (idx % 100) as u64 * 500,
            )
        })
        .collect();

    LedgerSnapshot::scoped(group.id, transactions, categories, members)
}

fn bench_aggregations(c: &mut Criterion) {
    let snapshot = build_sample_snapshot(black_box(10_000));
    let june = ReportFilter::spending().within(DateRange::month(2025, 6).expect("june"));
    let today = NaiveDate::from_ymd_opt(2025, 12, 31).expect("today");

    c.bench_function("total_by_month_10k", |b| {
        b.iter(|| black_box(snapshot.total_by(&june)))
    });

    c.bench_function("group_by_category_10k", |b| {
        b.iter(|| black_box(snapshot.group_by_category(&june)))
    });

    c.bench_function("group_by_calendar_date_10k", |b| {
        b.iter(|| black_box(AggregationEngine::group_by_calendar_date(&snapshot.transactions)))
    });

    c.bench_function("monthly_trend_12_10k", |b| {
        b.iter(|| black_box(snapshot.monthly_trend(12, today, Locale::Ko)))
    });
}

fn bench_store_io(c: &mut Criterion) {
    let snapshot = build_sample_snapshot(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("household.json");
    let seed = StoreSnapshot {
        schema_version: SNAPSHOT_SCHEMA_VERSION,
        members: snapshot
            .members
            .into_iter()
            .map(|member| StoredMember {
                member,
                user_id: None,
            })
            .collect(),
        categories: snapshot.categories,
        transactions: snapshot.transactions,
        ..StoreSnapshot::default()
    };
    let json = serde_json::to_string(&seed).expect("serialize seed");
    std::fs::write(&file_path, json).expect("write seed");

    c.bench_function("store_load_10k", |b| {
        b.iter(|| black_box(JsonStore::open(&file_path).expect("load store")))
    });
}

criterion_group!(benches, bench_aggregations, bench_store_io);
criterion_main!(benches);
