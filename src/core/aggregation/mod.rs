//! Stateless aggregation over transaction snapshots.
//!
//! Every operation is a pure function of its inputs: nothing is cached between
//! calls and nothing panics or errors on inconsistent reference data. Dangling
//! category or member ids are excluded, missing baselines come back as `None`,
//! and zero income yields an all-zero allocation.

pub mod derived;
pub mod filter;
pub mod grouping;
pub mod snapshot;
pub mod views;

use chrono::NaiveDate;

use crate::core::time::Clock;
use crate::domain::{Category, Member, Transaction};
use crate::format::Locale;

pub use filter::{ReportFilter, TransactionFilter};
pub use snapshot::LedgerSnapshot;
pub use views::{
    AllocationRatio, CategoryTotal, DayGroup, MemberAllocation, MemberFinancials, MemberShare,
    MemberTotal, MonthlyTotal, RankedCategory, TypeTotals,
};

/// Facade over the reporting operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct AggregationEngine;

impl AggregationEngine {
    pub fn total_by(transactions: &[Transaction], filter: &ReportFilter) -> u64 {
        filter::total_by(transactions, filter)
    }

    pub fn type_totals(transactions: &[Transaction], filter: &ReportFilter) -> TypeTotals {
        filter::type_totals(transactions, filter)
    }

    pub fn filter_transactions(
        transactions: &[Transaction],
        categories: &[Category],
        filter: &TransactionFilter,
    ) -> Vec<Transaction> {
        filter::filter_transactions(transactions, categories, filter)
    }

    pub fn count_matching(
        transactions: &[Transaction],
        categories: &[Category],
        filter: &TransactionFilter,
    ) -> usize {
        filter::count_matching(transactions, categories, filter)
    }

    pub fn group_by_calendar_date(transactions: &[Transaction]) -> Vec<DayGroup> {
        grouping::group_by_calendar_date(transactions)
    }

    pub fn group_by_category(
        transactions: &[Transaction],
        categories: &[Category],
        filter: &ReportFilter,
    ) -> Vec<CategoryTotal> {
        grouping::group_by_category(transactions, categories, filter)
    }

    pub fn group_by_member(
        transactions: &[Transaction],
        members: &[Member],
        filter: &ReportFilter,
    ) -> Vec<MemberTotal> {
        grouping::group_by_member(transactions, members, filter)
    }

    pub fn member_financials(
        transactions: &[Transaction],
        members: &[Member],
        filter: &ReportFilter,
    ) -> Vec<MemberFinancials> {
        grouping::member_financials(transactions, members, filter)
    }

    pub fn monthly_trend(
        transactions: &[Transaction],
        months_back: usize,
        today: NaiveDate,
        locale: Locale,
    ) -> Vec<MonthlyTotal> {
        derived::monthly_trend(transactions, months_back, today, locale)
    }

    /// [`monthly_trend`](Self::monthly_trend) ending at the clock's current month.
    pub fn monthly_trend_now(
        transactions: &[Transaction],
        months_back: usize,
        clock: &dyn Clock,
        locale: Locale,
    ) -> Vec<MonthlyTotal> {
        derived::monthly_trend(transactions, months_back, clock.today(), locale)
    }

    pub fn top_n_categories(
        transactions: &[Transaction],
        categories: &[Category],
        n: usize,
        filter: &ReportFilter,
    ) -> Vec<RankedCategory> {
        derived::top_n_categories(transactions, categories, n, filter)
    }

    pub fn income_allocation_ratio(
        income: u64,
        expense: u64,
        savings: u64,
        investment: u64,
    ) -> AllocationRatio {
        derived::income_allocation_ratio(income, expense, savings, investment)
    }

    pub fn month_over_month_change(current: u64, previous: u64) -> Option<f64> {
        derived::month_over_month_change(current, previous)
    }

    pub fn member_shares(totals: &[MemberTotal]) -> Vec<MemberShare> {
        derived::member_shares(totals)
    }

    pub fn budget_usage(spent: u64, budget: u64) -> Option<f64> {
        derived::budget_usage(spent, budget)
    }
}
