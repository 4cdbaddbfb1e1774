mod common;

use std::sync::Arc;

use common::{date, setup_test_env, Household};
use together_core::config::Config;
use together_core::core::aggregation::TransactionFilter;
use together_core::core::time::FixedClock;
use together_core::domain::{Displayable, InviteCode, NamedEntity, TransactionType};
use together_core::format::Locale;
use together_core::storage::{JsonStore, Store};
use together_core::{ReportService, SessionContext, TogetherError};
use uuid::Uuid;

fn seeded_household() -> (Household, JsonStore) {
    let home = Household::new();
    let transactions = vec![
        home.expense("food", date(2026, 2, 10), 45_000),
        home.tx(&home.wife, "transport", TransactionType::Expense, date(2026, 2, 10), 12_000),
        home.tx(&home.wife, "salary", TransactionType::Income, date(2026, 2, 1), 500_000),
        home.tx(&home.husband, "savings", TransactionType::Savings, date(2026, 2, 1), 100_000),
        home.expense("cafe", date(2026, 1, 18), 64_000),
    ];
    let (store, _) = setup_test_env(home.snapshot(transactions));
    (home, store)
}

#[test]
fn dashboard_reads_from_file_backed_store() {
    let (home, store) = seeded_household();
    let service = ReportService::new(
        Arc::new(store),
        Arc::new(FixedClock(date(2026, 2, 10))),
        Config::default(),
    );
    let mut session = SessionContext::for_user(home.husband_user);

    let report = service.dashboard(&mut session).unwrap();
    assert_eq!(report.month_total, 57_000);
    assert_eq!(report.today_total, 57_000);
    assert_eq!(report.budget, 2_000_000);
    assert_eq!(report.month_over_month, Some(-10.9));
    assert_eq!(report.allocation.expense_pct, 11);
    assert_eq!(report.allocation.savings_pct, 20);
    assert_eq!(report.allocation.unallocated_pct, 69);
    assert_eq!(report.recent[0].amount_label.chars().next(), Some('₩'));
}

#[test]
fn english_config_changes_labels_only() {
    let (home, store) = seeded_household();
    let config = Config {
        locale: Locale::En,
        trend_months: 3,
        ..Config::default()
    };
    let service = ReportService::new(
        Arc::new(store),
        Arc::new(FixedClock(date(2026, 2, 11))),
        config,
    );
    let mut session = SessionContext::for_user(home.husband_user);

    let stats = service.monthly_stats(&mut session, 2026, 2).unwrap();
    let labels: Vec<&str> = stats.trend.iter().map(|m| m.month_label.as_str()).collect();
    assert_eq!(labels, ["Dec", "Jan", "Feb"]);
    assert_eq!(stats.total, 57_000);

    let dashboard = service.dashboard(&mut session).unwrap();
    assert_eq!(dashboard.recent[0].date_label, "Yesterday");
}

#[test]
fn history_filters_by_type_and_category() {
    let (home, store) = seeded_household();
    let service = ReportService::new(
        Arc::new(store),
        Arc::new(FixedClock(date(2026, 2, 28))),
        Config::default(),
    );
    let mut session = SessionContext::for_user(home.husband_user);

    let income = TransactionFilter::default().kind(Some(TransactionType::Income));
    let report = service.history(&mut session, 2026, 2, &income).unwrap();
    assert_eq!(report.match_count, 1);
    assert_eq!(report.days[0].total, 500_000);

    let food = TransactionFilter::default()
        .kind(Some(TransactionType::Expense))
        .category(Some("food".into()));
    let report = service.history(&mut session, 2026, 2, &food).unwrap();
    assert_eq!(report.match_count, 1);
    assert_eq!(report.days[0].items[0].amount, 45_000);

    let january = service
        .history(&mut session, 2026, 1, &TransactionFilter::default())
        .unwrap();
    assert_eq!(january.match_count, 1);
}

#[test]
fn joining_by_invite_code_grants_a_session_group() {
    let (home, store) = seeded_household();
    let newcomer = Uuid::new_v4();
    let mut session = SessionContext::for_user(newcomer);
    assert_eq!(session.current_group_id(&store).unwrap(), None);

    let code = InviteCode::parse("love26").unwrap();
    let group = store.find_group_by_invite(&code).unwrap().unwrap();
    assert_eq!(group.name(), "Our Home");

    let member = store.join_group(newcomer, &code, "Guest").unwrap();
    assert_eq!(member.display_label(), "Guest (G)");
    assert_eq!(session.current_group_id(&store).unwrap(), Some(home.group.id));
    assert_eq!(store.list_members(home.group.id).unwrap().len(), 3);

    session.logout();
    assert!(matches!(
        session.require_group(&store),
        Err(TogetherError::NoActiveGroup)
    ));
}

#[test]
fn inserted_transactions_survive_save_and_reopen() {
    let (home, store) = seeded_household();
    store
        .insert_transaction(home.expense("shopping", date(2026, 2, 12), 30_000))
        .unwrap();
    store.save().unwrap();

    let path = store.path().unwrap().to_path_buf();
    let reopened = JsonStore::open(&path).unwrap();
    let listed = reopened.list_transactions(home.group.id, None).unwrap();
    assert_eq!(listed.len(), 6);
    assert_eq!(listed[0].date, date(2026, 2, 12));
}

#[test]
fn config_round_trips_through_manager() {
    let home = Household::new();
    let (_, config_manager) = setup_test_env(home.snapshot(Vec::new()));
    assert_eq!(config_manager.load().unwrap(), Config::default());

    let config = Config {
        default_budget: 1_500_000,
        recent_transactions: 10,
        ..Config::default()
    };
    config_manager.save(&config).unwrap();
    assert_eq!(config_manager.load().unwrap(), config);
}
