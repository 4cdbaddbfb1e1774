use tracing::debug;

use crate::core::time::previous_month;
use crate::domain::GroupId;
use crate::storage::{Result, Store};

pub struct BudgetService;

impl BudgetService {
    /// Budget for a month: the stored value, else last month's, else `default`.
    pub fn resolve(
        store: &dyn Store,
        group_id: GroupId,
        year: i32,
        month: u32,
        default: u64,
    ) -> Result<u64> {
        if let Some(amount) = store.monthly_budget(group_id, year, month)? {
            return Ok(amount);
        }
        let (prev_year, prev_month) = previous_month(year, month);
        if let Some(amount) = store.monthly_budget(group_id, prev_year, prev_month)? {
            debug!(%group_id, year, month, "carrying over previous month's budget");
            return Ok(amount);
        }
        Ok(default)
    }
}
