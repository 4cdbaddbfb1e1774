//! Trend series, rankings and ratios derived from the base aggregates.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::core::time::{first_of_month, shift_month};
use crate::domain::{Category, Transaction, TransactionType};
use crate::format::{month_label, Locale};

use super::filter::ReportFilter;
use super::grouping::group_by_category;
use super::views::{AllocationRatio, MemberShare, MemberTotal, MonthlyTotal, RankedCategory};

/// Expense totals for the `months_back` calendar months ending with the month
/// containing `today`, oldest first. Months without data are zero.
pub fn monthly_trend(
    transactions: &[Transaction],
    months_back: usize,
    today: NaiveDate,
    locale: Locale,
) -> Vec<MonthlyTotal> {
    let mut per_month: HashMap<(i32, u32), u64> = HashMap::new();
    for txn in transactions.iter().filter(|txn| txn.is_expense()) {
        let slot = per_month
            .entry((txn.date.year(), txn.date.month()))
            .or_default();
        *slot = slot.saturating_add(txn.amount);
    }

    let anchor = first_of_month(today);
    (0..months_back)
        .rev()
        .map(|offset| {
            let month_start = shift_month(anchor, -(offset as i32));
            let key = (month_start.year(), month_start.month());
            MonthlyTotal {
                month_label: month_label(month_start.month(), locale),
                year: key.0,
                month: key.1,
                total: per_month.get(&key).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// The `n` largest expense categories. Ties keep first-encountered order.
pub fn top_n_categories(
    transactions: &[Transaction],
    categories: &[Category],
    n: usize,
    filter: &ReportFilter,
) -> Vec<RankedCategory> {
    let filter = filter.with_kind(Some(TransactionType::Expense));
    let mut totals = group_by_category(transactions, categories, &filter);
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(pos, entry)| RankedCategory {
            rank: pos + 1,
            category_name: entry.category_name,
            total: entry.total,
            color: entry.color,
        })
        .collect()
}

/// Share of income consumed by each outflow type.
///
/// Zero income yields an all-zero ratio ("nothing recorded") rather than 100%
/// unallocated. Rounding error lands in `unallocated_pct`, which never goes
/// negative.
pub fn income_allocation_ratio(
    income: u64,
    expense: u64,
    savings: u64,
    investment: u64,
) -> AllocationRatio {
    if income == 0 {
        return AllocationRatio::default();
    }
    let expense_pct = rounded_percent(expense, income);
    let savings_pct = rounded_percent(savings, income);
    let investment_pct = rounded_percent(investment, income);
    let allocated = expense_pct
        .saturating_add(savings_pct)
        .saturating_add(investment_pct);
    AllocationRatio {
        expense_pct,
        savings_pct,
        investment_pct,
        unallocated_pct: 100u32.saturating_sub(allocated),
    }
}

/// Percentage change against the previous period, one decimal place.
/// `None` when there is no baseline.
pub fn month_over_month_change(current: u64, previous: u64) -> Option<f64> {
    if previous == 0 {
        return None;
    }
    let change = (current as f64 - previous as f64) / previous as f64 * 100.0;
    Some(round1(change))
}

/// Each member's share of the combined total. All zero when nobody spent.
pub fn member_shares(totals: &[MemberTotal]) -> Vec<MemberShare> {
    let combined = totals
        .iter()
        .fold(0u64, |sum, entry| sum.saturating_add(entry.total));
    totals
        .iter()
        .map(|entry| MemberShare {
            member_id: entry.member_id,
            name: entry.name.clone(),
            total: entry.total,
            share_pct: if combined == 0 {
                0.0
            } else {
                round1(entry.total as f64 / combined as f64 * 100.0)
            },
        })
        .collect()
}

/// Spent amount as a percentage of the budget, capped at 100.
pub fn budget_usage(spent: u64, budget: u64) -> Option<f64> {
    if budget == 0 {
        return None;
    }
    Some(capped_percent(spent, budget))
}

/// `round(100 * part / whole)` with halves rounding up, in integer arithmetic.
pub(crate) fn rounded_percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    let whole = u128::from(whole);
    let scaled = (u128::from(part) * 200 + whole) / (whole * 2);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// `part / whole` as a percentage, capped at 100 and rounded to one decimal.
pub(crate) fn capped_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round1((part as f64 / whole as f64 * 100.0).min(100.0))
}

/// Rounds to one decimal. A result of zero is always positive zero.
pub(crate) fn round1(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
