//! Screen-level reports assembled from the store and the aggregation engine.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::core::aggregation::{
    AggregationEngine, AllocationRatio, CategoryTotal, DayGroup, LedgerSnapshot, MemberFinancials,
    MemberShare, MemberTotal, MonthlyTotal, RankedCategory, ReportFilter, TransactionFilter,
    TypeTotals,
};
use crate::core::session::SessionContext;
use crate::core::time::{Clock, DateRange};
use crate::currency::{format_amount, format_difference};
use crate::domain::{
    Category, CategoryId, Member, MemberId, Transaction, TransactionId, TransactionType,
};
use crate::errors::TogetherError;
use crate::format::{percent_change_label, relative_date_label, type_label, Locale};
use crate::storage::Store;

use super::BudgetService;

const OTHER_COLOR: &str = "#9ca3af";

/// A transaction ready for list rendering. Unknown categories and members fall
/// back to a generic "other" label instead of being dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub type_label: String,
    pub category_name: String,
    pub icon: String,
    pub color: String,
    pub member_name: String,
    pub description: String,
    pub amount: u64,
    pub amount_label: String,
    pub date: NaiveDate,
    pub date_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub today: NaiveDate,
    pub month_total: u64,
    pub today_total: u64,
    pub previous_total: u64,
    pub budget: u64,
    pub budget_usage_pct: Option<f64>,
    pub month_over_month: Option<f64>,
    /// `"+12.5%"` style rendering of `month_over_month`.
    pub change_label: String,
    /// `"₩156,500 감소"` style difference against last month.
    pub difference_label: String,
    pub allocation: AllocationRatio,
    pub type_totals: TypeTotals,
    pub recent: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub year: i32,
    pub month: u32,
    pub total: u64,
    pub previous_total: u64,
    pub month_over_month: Option<f64>,
    pub categories: Vec<CategoryTotal>,
    pub members: Vec<MemberTotal>,
    pub member_shares: Vec<MemberShare>,
    pub member_financials: Vec<MemberFinancials>,
    pub trend: Vec<MonthlyTotal>,
    pub top_categories: Vec<RankedCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryReport {
    pub year: i32,
    pub month: u32,
    pub match_count: usize,
    pub days: Vec<DayGroup>,
}

pub struct ReportService {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    config: Config,
}

impl ReportService {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>, config: Config) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scoped view of everything the session's group has recorded.
    pub fn snapshot(&self, session: &mut SessionContext) -> Result<LedgerSnapshot, TogetherError> {
        let group_id = session.require_group(self.store.as_ref())?;
        let transactions = self.store.list_transactions(group_id, None)?;
        let categories = self.store.list_categories()?;
        let members = self.store.list_members(group_id)?;
        Ok(LedgerSnapshot::scoped(
            group_id,
            transactions,
            categories,
            members,
        ))
    }

    /// Home screen: this month's spending against budget, today's spending and
    /// the latest entries.
    pub fn dashboard(&self, session: &mut SessionContext) -> Result<DashboardReport, TogetherError> {
        let today = self.clock.today();
        let snapshot = self.snapshot(session)?;
        let month = DateRange::month_containing(today);
        let spending = ReportFilter::spending();

        let month_total = snapshot.total_by(&spending.within(month));
        let today_total = snapshot.total_by(&spending.within(DateRange::day(today)));
        let previous_total = snapshot.total_by(&spending.within(month.previous_month()));
        let budget = BudgetService::resolve(
            self.store.as_ref(),
            snapshot.group_id,
            today.year(),
            today.month(),
            self.config.default_budget,
        )?;
        let month_filter = ReportFilter::all_types().within(month);
        let month_over_month =
            AggregationEngine::month_over_month_change(month_total, previous_total);

        let mut latest: Vec<&Transaction> = snapshot.transactions.iter().collect();
        latest.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        let recent: Vec<Transaction> = latest
            .into_iter()
            .take(self.config.recent_transactions)
            .cloned()
            .collect();

        debug!(
            group_id = %snapshot.group_id,
            month_total,
            budget,
            "assembled dashboard"
        );
        Ok(DashboardReport {
            today,
            month_total,
            today_total,
            previous_total,
            budget,
            budget_usage_pct: AggregationEngine::budget_usage(month_total, budget),
            month_over_month,
            change_label: percent_change_label(month_over_month),
            difference_label: format_difference(
                month_total,
                previous_total,
                &self.config.locale_config(),
            ),
            allocation: snapshot.allocation(&month_filter),
            type_totals: snapshot.type_totals(&month_filter),
            recent: self.rows(&snapshot, &recent, today),
        })
    }

    /// Statistics screen for one month. The trend series always ends at the
    /// current month, whichever month is being viewed.
    pub fn monthly_stats(
        &self,
        session: &mut SessionContext,
        year: i32,
        month: u32,
    ) -> Result<StatsReport, TogetherError> {
        let range = DateRange::month(year, month)?;
        let snapshot = self.snapshot(session)?;
        let spending = ReportFilter::spending().within(range);

        let total = snapshot.total_by(&spending);
        let previous_total =
            snapshot.total_by(&ReportFilter::spending().within(range.previous_month()));
        let members = snapshot.group_by_member(&spending);

        debug!(group_id = %snapshot.group_id, year, month, total, "assembled monthly stats");
        Ok(StatsReport {
            year,
            month,
            total,
            previous_total,
            month_over_month: AggregationEngine::month_over_month_change(total, previous_total),
            categories: snapshot.group_by_category(&spending),
            member_shares: AggregationEngine::member_shares(&members),
            members,
            member_financials: snapshot.member_financials(&spending),
            trend: snapshot.monthly_trend(
                self.config.trend_months,
                self.clock.today(),
                self.config.locale,
            ),
            top_categories: snapshot.top_n_categories(self.config.top_categories, &spending),
        })
    }

    /// History screen: one month of entries after the user's filter, by day.
    pub fn history(
        &self,
        session: &mut SessionContext,
        year: i32,
        month: u32,
        filter: &TransactionFilter,
    ) -> Result<HistoryReport, TogetherError> {
        let range = DateRange::month(year, month)?;
        let snapshot = self.snapshot(session)?;
        let matching = snapshot.filter(&filter.clone().within(range));
        Ok(HistoryReport {
            year,
            month,
            match_count: matching.len(),
            days: AggregationEngine::group_by_calendar_date(&matching),
        })
    }

    /// Detail view of one entry of the session's group. `None` when the id is
    /// unknown or belongs to another household.
    pub fn transaction_detail(
        &self,
        session: &mut SessionContext,
        id: TransactionId,
    ) -> Result<Option<TransactionRow>, TogetherError> {
        let group_id = session.require_group(self.store.as_ref())?;
        let Some(txn) = self.store.find_transaction(group_id, id)? else {
            debug!(%group_id, transaction_id = %id, "transaction not found");
            return Ok(None);
        };
        let snapshot = LedgerSnapshot::scoped(
            group_id,
            Vec::new(),
            self.store.list_categories()?,
            self.store.list_members(group_id)?,
        );
        Ok(self
            .rows(&snapshot, &[txn], self.clock.today())
            .into_iter()
            .next())
    }

    fn rows(
        &self,
        snapshot: &LedgerSnapshot,
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> Vec<TransactionRow> {
        let locale_config = self.config.locale_config();
        let categories: HashMap<CategoryId, &Category> = snapshot
            .categories
            .iter()
            .map(|category| (category.id, category))
            .collect();
        let members: HashMap<MemberId, &Member> = snapshot
            .members
            .iter()
            .map(|member| (member.id, member))
            .collect();
        let other = other_label(self.config.locale);

        transactions
            .iter()
            .map(|txn| {
                let category = categories.get(&txn.category_id);
                TransactionRow {
                    id: txn.id,
                    kind: txn.kind,
                    type_label: type_label(txn.kind, self.config.locale).to_string(),
                    category_name: category
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| other.to_string()),
                    icon: category.map(|c| c.icon.clone()).unwrap_or_default(),
                    color: category
                        .map(|c| c.color.clone())
                        .unwrap_or_else(|| OTHER_COLOR.to_string()),
                    member_name: members
                        .get(&txn.member_id)
                        .map(|m| m.name.clone())
                        .unwrap_or_default(),
                    description: txn.description.clone(),
                    amount: txn.amount,
                    amount_label: format_amount(txn.amount, &locale_config),
                    date: txn.date,
                    date_label: relative_date_label(txn.date, today, self.config.locale),
                }
            })
            .collect()
    }
}

fn other_label(locale: Locale) -> &'static str {
    match locale {
        Locale::Ko => "기타",
        Locale::En => "Other",
    }
}
