#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;
use together_core::{
    config::ConfigManager,
    domain::{Category, Group, InviteCode, Member, Transaction, TransactionType},
    storage::{JsonStore, StoreSnapshot, StoredMember, SNAPSHOT_SCHEMA_VERSION},
};
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

/// A two-person household with a handful of categories.
pub struct Household {
    pub group: Group,
    pub husband: Member,
    pub wife: Member,
    pub husband_user: Uuid,
    pub categories: Vec<Category>,
}

impl Household {
    pub fn new() -> Self {
        let group = Group::new(
            "Our Home",
            InviteCode::parse("LOVE26").expect("valid invite code"),
        );
        let husband = Member::new(group.id, "남편", "H").with_colors("#3B82F6", "#DBEAFE");
        let wife = Member::new(group.id, "아내", "W").with_colors("#EC4899", "#FCE7F3");
        let categories = ["food", "transport", "shopping", "cafe", "salary", "savings"]
            .iter()
            .map(|name| Category::new(*name, "#9ca3af"))
            .collect();
        Self {
            group,
            husband,
            wife,
            husband_user: Uuid::new_v4(),
            categories,
        }
    }

    pub fn category(&self, name: &str) -> &Category {
        self.categories
            .iter()
            .find(|category| category.name == name)
            .expect("category seeded in fixture")
    }

    pub fn members(&self) -> Vec<Member> {
        vec![self.husband.clone(), self.wife.clone()]
    }

    pub fn tx(
        &self,
        member: &Member,
        category: &str,
        kind: TransactionType,
        date: NaiveDate,
        amount: u64,
    ) -> Transaction {
        Transaction::new(
            self.group.id,
            member.id,
            self.category(category).id,
            kind,
            date,
            amount,
        )
    }

    pub fn expense(&self, category: &str, date: NaiveDate, amount: u64) -> Transaction {
        self.tx(&self.husband, category, TransactionType::Expense, date, amount)
    }

    /// Persistable dataset with the husband bound to `husband_user`.
    pub fn snapshot(&self, transactions: Vec<Transaction>) -> StoreSnapshot {
        StoreSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            groups: vec![self.group.clone()],
            members: vec![
                StoredMember {
                    member: self.husband.clone(),
                    user_id: Some(self.husband_user),
                },
                StoredMember {
                    member: self.wife.clone(),
                    user_id: None,
                },
            ],
            categories: self.categories.clone(),
            transactions,
            budgets: Vec::new(),
        }
    }
}

/// Creates an isolated file-backed store and config manager for each test.
pub fn setup_test_env(snapshot: StoreSnapshot) -> (JsonStore, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let path = base.join("household.json");
    let json = serde_json::to_string_pretty(&snapshot).expect("serialize seed");
    std::fs::write(&path, json).expect("write seed file");

    let store = JsonStore::open(&path).expect("open json store");
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");
    (store, config_manager)
}
