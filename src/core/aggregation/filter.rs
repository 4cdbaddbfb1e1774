//! Transaction predicates and the summation primitives built on them.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::time::DateRange;
use crate::domain::{Category, CategoryId, MemberId, Transaction, TransactionType};

use super::views::TypeTotals;

/// Date-range and type predicate shared by the reporting operations.
///
/// The default filter is the spending filter: no date bounds, expenses only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(default, rename = "type")]
    pub kind: Option<TransactionType>,
}

impl Default for ReportFilter {
    fn default() -> Self {
        Self::spending()
    }
}

impl ReportFilter {
    pub fn spending() -> Self {
        Self::of_type(TransactionType::Expense)
    }

    pub fn of_type(kind: TransactionType) -> Self {
        Self {
            start: None,
            end: None,
            kind: Some(kind),
        }
    }

    /// No type predicate at all.
    pub fn all_types() -> Self {
        Self {
            start: None,
            end: None,
            kind: None,
        }
    }

    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn within(self, range: DateRange) -> Self {
        self.between(Some(range.start), Some(range.end))
    }

    pub fn with_kind(mut self, kind: Option<TransactionType>) -> Self {
        self.kind = kind;
        self
    }

    pub fn includes_date(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.includes_date(txn.date) && self.kind.map_or(true, |kind| txn.kind == kind)
    }
}

/// History screen filter: who spent, which type, which category, and when.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<DateRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<MemberId>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

impl TransactionFilter {
    pub fn within(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn member(mut self, member_id: Option<MemberId>) -> Self {
        self.member_id = member_id;
        self
    }

    /// Selects a type. Switching to a different type drops the category choice,
    /// since category names are listed per type.
    pub fn kind(mut self, kind: Option<TransactionType>) -> Self {
        if self.kind != kind {
            self.category_name = None;
        }
        self.kind = kind;
        self
    }

    pub fn category(mut self, name: Option<String>) -> Self {
        self.category_name = name;
        self
    }

    /// True when any user-facing selection (member, type, category) is set.
    pub fn is_active(&self) -> bool {
        self.member_id.is_some() || self.kind.is_some() || self.category_name.is_some()
    }

    pub fn reset(&mut self) {
        self.member_id = None;
        self.kind = None;
        self.category_name = None;
    }

    fn matches(&self, txn: &Transaction, categories: &HashMap<CategoryId, &Category>) -> bool {
        if let Some(range) = &self.range {
            if !range.contains(txn.date) {
                return false;
            }
        }
        if self.member_id.is_some_and(|member| member != txn.member_id) {
            return false;
        }
        if self.kind.is_some_and(|kind| kind != txn.kind) {
            return false;
        }
        match &self.category_name {
            Some(name) => categories
                .get(&txn.category_id)
                .is_some_and(|category| &category.name == name),
            None => true,
        }
    }
}

pub(crate) fn category_index(categories: &[Category]) -> HashMap<CategoryId, &Category> {
    categories
        .iter()
        .map(|category| (category.id, category))
        .collect()
}

pub fn total_by(transactions: &[Transaction], filter: &ReportFilter) -> u64 {
    transactions
        .iter()
        .filter(|txn| filter.matches(txn))
        .fold(0u64, |sum, txn| sum.saturating_add(txn.amount))
}

/// Per-type totals in a single pass. The filter's type predicate is ignored.
pub fn type_totals(transactions: &[Transaction], filter: &ReportFilter) -> TypeTotals {
    let filter = filter.with_kind(None);
    let mut totals = TypeTotals::default();
    for txn in transactions.iter().filter(|txn| filter.matches(txn)) {
        totals.add(txn.kind, txn.amount);
    }
    totals
}

/// Transactions passing the history filter, in input order. A category filter
/// never matches a transaction whose category cannot be resolved.
pub fn filter_transactions(
    transactions: &[Transaction],
    categories: &[Category],
    filter: &TransactionFilter,
) -> Vec<Transaction> {
    let index = category_index(categories);
    transactions
        .iter()
        .filter(|txn| filter.matches(txn, &index))
        .cloned()
        .collect()
}

pub fn count_matching(
    transactions: &[Transaction],
    categories: &[Category],
    filter: &TransactionFilter,
) -> usize {
    let index = category_index(categories);
    transactions
        .iter()
        .filter(|txn| filter.matches(txn, &index))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(kind: TransactionType, day: NaiveDate, amount: u64) -> Transaction {
        Transaction::new(
            Uuid::nil(),
            Uuid::nil(),
            Uuid::nil(),
            kind,
            day,
            amount,
        )
    }

    #[test]
    fn default_filter_only_counts_expenses() {
        let txns = vec![
            txn(TransactionType::Expense, date(2026, 2, 10), 45_000),
            txn(TransactionType::Income, date(2026, 2, 1), 500_000),
            txn(TransactionType::Savings, date(2026, 2, 3), 100_000),
        ];
        assert_eq!(total_by(&txns, &ReportFilter::default()), 45_000);
        assert_eq!(total_by(&txns, &ReportFilter::all_types()), 645_000);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let txns = vec![
            txn(TransactionType::Expense, date(2026, 1, 31), 1),
            txn(TransactionType::Expense, date(2026, 2, 1), 10),
            txn(TransactionType::Expense, date(2026, 2, 28), 100),
            txn(TransactionType::Expense, date(2026, 3, 1), 1000),
        ];
        let february = ReportFilter::spending().between(Some(date(2026, 2, 1)), Some(date(2026, 2, 28)));
        assert_eq!(total_by(&txns, &february), 110);

        let open_start = ReportFilter::spending().between(None, Some(date(2026, 2, 1)));
        assert_eq!(total_by(&txns, &open_start), 11);
    }

    #[test]
    fn empty_input_sums_to_zero() {
        assert_eq!(total_by(&[], &ReportFilter::all_types()), 0);
    }

    #[test]
    fn type_totals_ignore_type_predicate() {
        let txns = vec![
            txn(TransactionType::Expense, date(2026, 2, 10), 5),
            txn(TransactionType::Investment, date(2026, 2, 10), 7),
            txn(TransactionType::Income, date(2026, 2, 10), 20),
        ];
        let totals = type_totals(&txns, &ReportFilter::spending());
        assert_eq!(totals.expense, 5);
        assert_eq!(totals.investment, 7);
        assert_eq!(totals.income, 20);
        assert_eq!(totals.outflow(), 12);
        assert_eq!(totals.get(TransactionType::Investment), 7);
        assert!(totals.has_activity());
        let before_any = ReportFilter::spending().between(None, Some(date(2026, 1, 1)));
        assert!(!type_totals(&txns, &before_any).has_activity());
    }

    #[test]
    fn changing_type_clears_category_selection() {
        let filter = TransactionFilter::default()
            .kind(Some(TransactionType::Expense))
            .category(Some("food".into()));
        assert!(filter.is_active());

        let same = filter.clone().kind(Some(TransactionType::Expense));
        assert_eq!(same.category_name.as_deref(), Some("food"));

        let switched = filter.kind(Some(TransactionType::Income));
        assert!(switched.category_name.is_none());
    }

    #[test]
    fn history_filter_matches_member_type_and_category() {
        let food = Category::new("food", "#f87171");
        let cafe = Category::new("cafe", "#fbbf24");
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let day = date(2026, 2, 10);
        let mut a = txn(TransactionType::Expense, day, 10);
        a.member_id = alice;
        a.category_id = food.id;
        let mut b = txn(TransactionType::Expense, day, 20);
        b.member_id = bob;
        b.category_id = cafe.id;
        let mut c = txn(TransactionType::Expense, day, 30);
        c.member_id = alice;
        c.category_id = Uuid::new_v4();
        let txns = vec![a.clone(), b, c];
        let categories = vec![food, cafe];

        let by_member = TransactionFilter::default().member(Some(alice));
        assert_eq!(count_matching(&txns, &categories, &by_member), 2);

        let by_category = by_member.category(Some("food".into()));
        assert_eq!(filter_transactions(&txns, &categories, &by_category), vec![a]);

        let mut cleared = by_category;
        cleared.reset();
        assert!(!cleared.is_active());
        assert_eq!(count_matching(&txns, &categories, &cleared), 3);
    }
}
