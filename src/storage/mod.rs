//! The persistence seam the reporting layer reads from.

pub mod json_backend;

use uuid::Uuid;

use crate::core::time::DateRange;
use crate::domain::{Category, Group, GroupId, InviteCode, Member, Transaction, TransactionId};
use crate::errors::TogetherError;

pub type Result<T> = std::result::Result<T, TogetherError>;

/// Read access to persisted household data.
///
/// Implementations must scope transaction and member listings to the requested
/// group; the aggregation layer re-checks this but does not rely on it.
pub trait Store: Send + Sync {
    /// Transactions of `group_id`, newest date first, optionally limited to an
    /// inclusive date range.
    fn list_transactions(
        &self,
        group_id: GroupId,
        range: Option<DateRange>,
    ) -> Result<Vec<Transaction>>;

    /// A single transaction of `group_id`; other groups' ids are not found.
    fn find_transaction(&self, group_id: GroupId, id: TransactionId)
        -> Result<Option<Transaction>>;

    /// Global category table, ordered by name.
    fn list_categories(&self) -> Result<Vec<Category>>;

    fn list_members(&self, group_id: GroupId) -> Result<Vec<Member>>;

    /// Group the given authenticated user belongs to, if any.
    fn group_for_user(&self, user_id: Uuid) -> Result<Option<GroupId>>;

    fn find_group_by_invite(&self, code: &InviteCode) -> Result<Option<Group>>;

    /// Budget explicitly stored for one month.
    fn monthly_budget(&self, group_id: GroupId, year: i32, month: u32) -> Result<Option<u64>>;
}

pub use json_backend::{JsonStore, MonthlyBudget, StoreSnapshot, StoredMember, SNAPSHOT_SCHEMA_VERSION};
