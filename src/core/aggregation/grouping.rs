//! Partitioning transactions by day, category and member.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{Category, Member, MemberId, Transaction};

use super::derived::{capped_percent, round1};
use super::filter::{category_index, ReportFilter};
use super::views::{
    CategoryTotal, DayGroup, MemberAllocation, MemberFinancials, MemberTotal, TypeTotals,
};

/// Day groups, most recent day first. Every transaction type counts toward a
/// day's total because the history view lists everything.
pub fn group_by_calendar_date(transactions: &[Transaction]) -> Vec<DayGroup> {
    let mut days: BTreeMap<NaiveDate, Vec<Transaction>> = BTreeMap::new();
    for txn in transactions {
        days.entry(txn.date).or_default().push(txn.clone());
    }

    days.into_iter()
        .rev()
        .map(|(date, mut items)| {
            items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let total = items
                .iter()
                .fold(0u64, |sum, txn| sum.saturating_add(txn.amount));
            DayGroup { date, items, total }
        })
        .collect()
}

/// Totals keyed by category name in first-encountered order. Categories with no
/// matching transactions are absent; transactions whose category cannot be
/// resolved are skipped.
pub fn group_by_category(
    transactions: &[Transaction],
    categories: &[Category],
    filter: &ReportFilter,
) -> Vec<CategoryTotal> {
    let index = category_index(categories);
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut unresolved = 0usize;

    for txn in transactions.iter().filter(|txn| filter.matches(txn)) {
        let Some(&category) = index.get(&txn.category_id) else {
            unresolved += 1;
            continue;
        };
        match positions.get(category.name.as_str()) {
            Some(&pos) => {
                totals[pos].total = totals[pos].total.saturating_add(txn.amount);
            }
            None => {
                positions.insert(category.name.as_str(), totals.len());
                totals.push(CategoryTotal {
                    category_name: category.name.clone(),
                    total: txn.amount,
                    color: category.color.clone(),
                    share_pct: 0.0,
                });
            }
        }
    }

    if unresolved > 0 {
        debug!(unresolved, "skipped transactions with unknown categories");
    }

    let combined = totals
        .iter()
        .fold(0u64, |sum, entry| sum.saturating_add(entry.total));
    if combined > 0 {
        for entry in &mut totals {
            entry.share_pct = round1(entry.total as f64 / combined as f64 * 100.0);
        }
    }
    totals
}

/// One entry per member, in member order, including members with nothing
/// recorded. Transactions by unknown members are skipped.
pub fn group_by_member(
    transactions: &[Transaction],
    members: &[Member],
    filter: &ReportFilter,
) -> Vec<MemberTotal> {
    let positions = member_positions(members);
    let mut totals = vec![0u64; members.len()];

    for txn in transactions.iter().filter(|txn| filter.matches(txn)) {
        if let Some(&pos) = positions.get(&txn.member_id) {
            totals[pos] = totals[pos].saturating_add(txn.amount);
        }
    }

    members
        .iter()
        .zip(totals)
        .map(|(member, total)| MemberTotal {
            member_id: member.id,
            name: member.name.clone(),
            avatar: member.avatar.clone(),
            total,
            color: member.color.clone(),
            bg_color: member.bg_color.clone(),
        })
        .collect()
}

/// Per-member income/expense/savings/investment profile, dense like
/// [`group_by_member`]. Only the filter's date bounds apply.
pub fn member_financials(
    transactions: &[Transaction],
    members: &[Member],
    filter: &ReportFilter,
) -> Vec<MemberFinancials> {
    let filter = filter.with_kind(None);
    let positions = member_positions(members);
    let mut totals = vec![TypeTotals::default(); members.len()];

    for txn in transactions.iter().filter(|txn| filter.matches(txn)) {
        if let Some(&pos) = positions.get(&txn.member_id) {
            totals[pos].add(txn.kind, txn.amount);
        }
    }

    members
        .iter()
        .zip(totals)
        .map(|(member, totals)| MemberFinancials {
            member_id: member.id,
            name: member.name.clone(),
            avatar: member.avatar.clone(),
            bg_color: member.bg_color.clone(),
            allocation: member_allocation(&totals),
            totals,
        })
        .collect()
}

fn member_allocation(totals: &TypeTotals) -> MemberAllocation {
    let income_based = totals.income > 0;
    if !totals.has_activity() {
        return MemberAllocation::default();
    }
    let base = if income_based {
        totals.income
    } else {
        totals.outflow()
    };
    let expense_pct = capped_percent(totals.expense, base);
    let savings_pct = capped_percent(totals.savings, base);
    let investment_pct = capped_percent(totals.investment, base);
    let remaining_pct = (100.0 - expense_pct - savings_pct - investment_pct).max(0.0);
    MemberAllocation {
        income_based,
        expense_pct,
        savings_pct,
        investment_pct,
        remaining_pct,
    }
}

fn member_positions(members: &[Member]) -> HashMap<MemberId, usize> {
    members
        .iter()
        .enumerate()
        .map(|(pos, member)| (member.id, pos))
        .collect()
}
