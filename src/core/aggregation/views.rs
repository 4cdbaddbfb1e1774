//! Plain serializable view models handed to the rendering layer.
//!
//! Amounts stay integers in the smallest currency unit; percentages are
//! rounded before they leave the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{MemberId, Transaction, TransactionType};

/// Transactions sharing one calendar day, newest first inside the day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayGroup {
    pub date: NaiveDate,
    pub items: Vec<Transaction>,
    pub total: u64,
}

/// `share_pct` is this category's part of all category totals in the same
/// result, to one decimal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category_name: String,
    pub total: u64,
    pub color: String,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemberTotal {
    pub member_id: MemberId,
    pub name: String,
    pub avatar: String,
    pub total: u64,
    pub color: String,
    pub bg_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    pub month_label: String,
    pub year: i32,
    pub month: u32,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RankedCategory {
    pub rank: usize,
    pub category_name: String,
    pub total: u64,
    pub color: String,
}

/// How income was spent. All zero means no income was recorded.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRatio {
    pub expense_pct: u32,
    pub savings_pct: u32,
    pub investment_pct: u32,
    pub unallocated_pct: u32,
}

impl AllocationRatio {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One total per transaction type.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypeTotals {
    pub expense: u64,
    pub income: u64,
    pub savings: u64,
    pub investment: u64,
}

impl TypeTotals {
    pub fn add(&mut self, kind: TransactionType, amount: u64) {
        let slot = match kind {
            TransactionType::Expense => &mut self.expense,
            TransactionType::Income => &mut self.income,
            TransactionType::Savings => &mut self.savings,
            TransactionType::Investment => &mut self.investment,
        };
        *slot = slot.saturating_add(amount);
    }

    pub fn get(&self, kind: TransactionType) -> u64 {
        match kind {
            TransactionType::Expense => self.expense,
            TransactionType::Income => self.income,
            TransactionType::Savings => self.savings,
            TransactionType::Investment => self.investment,
        }
    }

    pub fn outflow(&self) -> u64 {
        self.expense
            .saturating_add(self.savings)
            .saturating_add(self.investment)
    }

    pub fn has_activity(&self) -> bool {
        self.income > 0 || self.outflow() > 0
    }
}

/// Per-member split of outflows against income (or against total outflow when
/// the member recorded no income). Each share is capped at 100.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberAllocation {
    pub income_based: bool,
    pub expense_pct: f64,
    pub savings_pct: f64,
    pub investment_pct: f64,
    pub remaining_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberFinancials {
    pub member_id: MemberId,
    pub name: String,
    pub avatar: String,
    pub bg_color: String,
    pub totals: TypeTotals,
    pub allocation: MemberAllocation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberShare {
    pub member_id: MemberId,
    pub name: String,
    pub total: u64,
    pub share_pct: f64,
}
