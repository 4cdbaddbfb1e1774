use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Category, GroupId, GroupScoped, Member, Transaction};
use crate::format::Locale;

use super::views::*;
use super::{AggregationEngine, ReportFilter, TransactionFilter};

/// Transactions and reference data for exactly one group.
///
/// Records that belong to another group are dropped at construction, so none
/// of the bound operations can aggregate across households even if the
/// upstream store failed to filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    pub group_id: GroupId,
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub members: Vec<Member>,
}

impl LedgerSnapshot {
    pub fn scoped(
        group_id: GroupId,
        transactions: Vec<Transaction>,
        categories: Vec<Category>,
        members: Vec<Member>,
    ) -> Self {
        let (transactions, foreign_txns) = keep_group(group_id, transactions);
        let (members, foreign_members) = keep_group(group_id, members);
        if foreign_txns > 0 || foreign_members > 0 {
            warn!(
                %group_id,
                foreign_txns,
                foreign_members,
                "dropped records belonging to another group"
            );
        }
        Self {
            group_id,
            transactions,
            categories,
            members,
        }
    }

    pub fn total_by(&self, filter: &ReportFilter) -> u64 {
        AggregationEngine::total_by(&self.transactions, filter)
    }

    pub fn type_totals(&self, filter: &ReportFilter) -> TypeTotals {
        AggregationEngine::type_totals(&self.transactions, filter)
    }

    /// Income allocation over the filter's date bounds.
    pub fn allocation(&self, filter: &ReportFilter) -> AllocationRatio {
        let totals = self.type_totals(filter);
        AggregationEngine::income_allocation_ratio(
            totals.income,
            totals.expense,
            totals.savings,
            totals.investment,
        )
    }

    pub fn filter(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        AggregationEngine::filter_transactions(&self.transactions, &self.categories, filter)
    }

    pub fn group_by_calendar_date(&self) -> Vec<DayGroup> {
        AggregationEngine::group_by_calendar_date(&self.transactions)
    }

    pub fn group_by_category(&self, filter: &ReportFilter) -> Vec<CategoryTotal> {
        AggregationEngine::group_by_category(&self.transactions, &self.categories, filter)
    }

    pub fn group_by_member(&self, filter: &ReportFilter) -> Vec<MemberTotal> {
        AggregationEngine::group_by_member(&self.transactions, &self.members, filter)
    }

    pub fn member_financials(&self, filter: &ReportFilter) -> Vec<MemberFinancials> {
        AggregationEngine::member_financials(&self.transactions, &self.members, filter)
    }

    pub fn monthly_trend(
        &self,
        months_back: usize,
        today: NaiveDate,
        locale: Locale,
    ) -> Vec<MonthlyTotal> {
        AggregationEngine::monthly_trend(&self.transactions, months_back, today, locale)
    }

    pub fn top_n_categories(&self, n: usize, filter: &ReportFilter) -> Vec<RankedCategory> {
        AggregationEngine::top_n_categories(&self.transactions, &self.categories, n, filter)
    }
}

fn keep_group<T: GroupScoped>(group_id: GroupId, records: Vec<T>) -> (Vec<T>, usize) {
    let before = records.len();
    let kept: Vec<T> = records
        .into_iter()
        .filter(|record| record.belongs_to(group_id))
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionType;
    use uuid::Uuid;

    #[test]
    fn foreign_records_are_dropped() {
        let ours = Uuid::new_v4();
        let theirs = Uuid::new_v4();
        let food = Category::new("food", "#f87171");
        let member = Member::new(ours, "Me", "M");
        let outsider = Member::new(theirs, "Them", "T");
        let day = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let mine = Transaction::new(ours, member.id, food.id, TransactionType::Expense, day, 100);
        let leaked = Transaction::new(theirs, outsider.id, food.id, TransactionType::Expense, day, 900);

        let snapshot = LedgerSnapshot::scoped(
            ours,
            vec![mine, leaked],
            vec![food],
            vec![member, outsider],
        );
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.members.len(), 1);
        assert_eq!(snapshot.total_by(&ReportFilter::spending()), 100);
        assert_eq!(snapshot.group_by_member(&ReportFilter::spending()).len(), 1);
    }
}
