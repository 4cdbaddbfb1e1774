//! Ledger entries recorded by group members.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::errors::TogetherError;

/// Partitions the ledger into four non-overlapping buckets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
    Savings,
    Investment,
}

impl TransactionType {
    pub const ALL: [TransactionType; 4] = [
        TransactionType::Expense,
        TransactionType::Income,
        TransactionType::Savings,
        TransactionType::Investment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
            TransactionType::Savings => "savings",
            TransactionType::Investment => "investment",
        }
    }

    /// Money leaving the household budget (everything except income).
    pub fn is_outflow(&self) -> bool {
        !matches!(self, TransactionType::Income)
    }
}

impl Default for TransactionType {
    fn default() -> Self {
        TransactionType::Expense
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = TogetherError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(TransactionType::Expense),
            "income" => Ok(TransactionType::Income),
            "savings" => Ok(TransactionType::Savings),
            "investment" => Ok(TransactionType::Investment),
            other => Err(TogetherError::InvalidInput(format!(
                "unknown transaction type `{other}`"
            ))),
        }
    }
}

/// A single ledger entry. Amounts are in the smallest currency unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub group_id: GroupId,
    pub amount: u64,
    pub category_id: CategoryId,
    pub member_id: MemberId,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(rename = "type", default)]
    pub kind: TransactionType,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        group_id: GroupId,
        member_id: MemberId,
        category_id: CategoryId,
        kind: TransactionType,
        date: NaiveDate,
        amount: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            amount,
            category_id,
            member_id,
            description: String::new(),
            date,
            kind,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl GroupScoped for Transaction {
    fn group_id(&self) -> GroupId {
        self.group_id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        if self.description.is_empty() {
            format!("{} {} ({})", self.date, self.amount, self.kind)
        } else {
            format!(
                "{} {} ({}) {}",
                self.date, self.amount, self.kind, self.description
            )
        }
    }
}
