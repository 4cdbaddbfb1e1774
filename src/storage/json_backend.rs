use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    config::Config,
    core::{
        time::DateRange,
        utils::{write_atomic, PathResolver},
    },
    domain::{
        Category, Displayable, Group, GroupId, InviteCode, Member, Transaction, TransactionId,
    },
    errors::TogetherError,
};

use super::{Result, Store};

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;
const DEFAULT_SNAPSHOT_NAME: &str = "household";

/// Member row plus the authenticated user it is bound to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredMember {
    #[serde(flatten)]
    pub member: Member,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBudget {
    pub group_id: GroupId,
    pub year: i32,
    pub month: u32,
    pub amount: u64,
}

/// Entire on-disk dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub members: Vec<StoredMember>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<MonthlyBudget>,
}

fn default_schema_version() -> u32 {
    SNAPSHOT_SCHEMA_VERSION
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            groups: Vec::new(),
            members: Vec::new(),
            categories: Vec::new(),
            transactions: Vec::new(),
            budgets: Vec::new(),
        }
    }
}

/// In-memory store backed by a single JSON document.
pub struct JsonStore {
    path: Option<PathBuf>,
    data: RwLock<StoreSnapshot>,
}

impl JsonStore {
    /// Store that lives only in memory.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            path: None,
            data: RwLock::new(snapshot),
        }
    }

    /// Opens `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let snapshot = if path.exists() {
            load_snapshot(&path)?
        } else {
            StoreSnapshot::default()
        };
        info!(
            path = %path.display(),
            transactions = snapshot.transactions.len(),
            "opened json store"
        );
        Ok(Self {
            path: Some(path),
            data: RwLock::new(snapshot),
        })
    }

    /// Opens the store named by `config.store_path`, or the default household
    /// snapshot under `base` (the application data directory when `None`).
    pub fn open_configured(config: &Config, base: Option<PathBuf>) -> Result<Self> {
        let path = match &config.store_path {
            Some(path) => path.clone(),
            None => PathResolver::snapshot_file_in(
                &PathResolver::resolve_base(base),
                DEFAULT_SNAPSHOT_NAME,
            ),
        };
        Self::open(path)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Persists the current dataset atomically. In-memory stores are a no-op.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let data = self.read()?;
        let json = serde_json::to_string_pretty(&*data)?;
        write_atomic(path, &json)?;
        debug!(path = %path.display(), "saved json store");
        Ok(())
    }

    pub fn snapshot(&self) -> Result<StoreSnapshot> {
        Ok(self.read()?.clone())
    }

    pub fn insert_transaction(&self, transaction: Transaction) -> Result<()> {
        let mut data = self.write()?;
        if !data.groups.iter().any(|group| group.id == transaction.group_id) {
            return Err(TogetherError::GroupNotFound(transaction.group_id.to_string()));
        }
        debug!(
            group_id = %transaction.group_id,
            entry = %transaction.display_label(),
            "recorded transaction"
        );
        data.transactions.push(transaction);
        Ok(())
    }

    /// Replaces every editable field of a stored transaction. The id, owning
    /// group and creation time stay as stored; a transaction of another group
    /// is treated as missing.
    pub fn update_transaction(
        &self,
        group_id: GroupId,
        updated: Transaction,
    ) -> Result<Transaction> {
        let mut data = self.write()?;
        let stored = data
            .transactions
            .iter_mut()
            .find(|txn| txn.id == updated.id && txn.group_id == group_id)
            .ok_or_else(|| TogetherError::TransactionNotFound(updated.id.to_string()))?;
        if updated.group_id != group_id {
            return Err(TogetherError::InvalidInput(
                "a transaction cannot move to another group".into(),
            ));
        }
        stored.amount = updated.amount;
        stored.category_id = updated.category_id;
        stored.member_id = updated.member_id;
        stored.description = updated.description;
        stored.date = updated.date;
        stored.kind = updated.kind;
        debug!(%group_id, entry = %stored.display_label(), "updated transaction");
        Ok(stored.clone())
    }

    pub fn delete_transaction(&self, group_id: GroupId, id: TransactionId) -> Result<Transaction> {
        let mut data = self.write()?;
        let pos = data
            .transactions
            .iter()
            .position(|txn| txn.id == id && txn.group_id == group_id)
            .ok_or_else(|| TogetherError::TransactionNotFound(id.to_string()))?;
        let removed = data.transactions.remove(pos);
        debug!(%group_id, transaction_id = %id, "deleted transaction");
        Ok(removed)
    }

    /// Creates or replaces the budget for one month.
    pub fn set_budget(&self, group_id: GroupId, year: i32, month: u32, amount: u64) -> Result<()> {
        let mut data = self.write()?;
        match data
            .budgets
            .iter_mut()
            .find(|b| b.group_id == group_id && b.year == year && b.month == month)
        {
            Some(existing) => existing.amount = amount,
            None => data.budgets.push(MonthlyBudget {
                group_id,
                year,
                month,
                amount,
            }),
        }
        Ok(())
    }

    /// Adds `user_id` to the group owning `code` as a new member.
    pub fn join_group(
        &self,
        user_id: Uuid,
        code: &InviteCode,
        member_name: &str,
    ) -> Result<Member> {
        let mut data = self.write()?;
        let group_id = data
            .groups
            .iter()
            .find(|group| &group.invite_code == code)
            .map(|group| group.id)
            .ok_or_else(|| TogetherError::InvalidInviteCode(code.to_string()))?;
        if data
            .members
            .iter()
            .any(|stored| stored.user_id == Some(user_id) && stored.member.group_id == group_id)
        {
            return Err(TogetherError::InvalidInput(
                "user already belongs to this group".into(),
            ));
        }
        let avatar: String = member_name.chars().take(1).collect();
        let member = Member::new(group_id, member_name, avatar);
        data.members.push(StoredMember {
            member: member.clone(),
            user_id: Some(user_id),
        });
        info!(%group_id, member_id = %member.id, "member joined group");
        Ok(member)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, StoreSnapshot>> {
        self.data
            .read()
            .map_err(|_| TogetherError::StorageError("store lock poisoned".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, StoreSnapshot>> {
        self.data
            .write()
            .map_err(|_| TogetherError::StorageError("store lock poisoned".into()))
    }
}

impl Store for JsonStore {
    fn list_transactions(
        &self,
        group_id: GroupId,
        range: Option<DateRange>,
    ) -> Result<Vec<Transaction>> {
        let data = self.read()?;
        let mut rows: Vec<Transaction> = data
            .transactions
            .iter()
            .filter(|txn| txn.group_id == group_id)
            .filter(|txn| range.map_or(true, |range| range.contains(txn.date)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(rows)
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        let mut categories = self.read()?.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    fn list_members(&self, group_id: GroupId) -> Result<Vec<Member>> {
        Ok(self
            .read()?
            .members
            .iter()
            .filter(|stored| stored.member.group_id == group_id)
            .map(|stored| stored.member.clone())
            .collect())
    }

    fn group_for_user(&self, user_id: Uuid) -> Result<Option<GroupId>> {
        Ok(self
            .read()?
            .members
            .iter()
            .find(|stored| stored.user_id == Some(user_id))
            .map(|stored| stored.member.group_id))
    }

    fn find_transaction(
        &self,
        group_id: GroupId,
        id: TransactionId,
    ) -> Result<Option<Transaction>> {
        Ok(self
            .read()?
            .transactions
            .iter()
            .find(|txn| txn.id == id && txn.group_id == group_id)
            .cloned())
    }

    fn find_group_by_invite(&self, code: &InviteCode) -> Result<Option<Group>> {
        Ok(self
            .read()?
            .groups
            .iter()
            .find(|group| &group.invite_code == code)
            .cloned())
    }

    fn monthly_budget(&self, group_id: GroupId, year: i32, month: u32) -> Result<Option<u64>> {
        Ok(self
            .read()?
            .budgets
            .iter()
            .find(|b| b.group_id == group_id && b.year == year && b.month == month)
            .map(|b| b.amount))
    }
}

/// Reads a snapshot, refusing files written by a newer schema.
pub fn load_snapshot(path: &Path) -> Result<StoreSnapshot> {
    let data = fs::read_to_string(path)?;
    let snapshot: StoreSnapshot = serde_json::from_str(&data)?;
    if snapshot.schema_version > SNAPSHOT_SCHEMA_VERSION {
        return Err(TogetherError::StorageError(format!(
            "store snapshot `{}` is from a newer schema version",
            path.display()
        )));
    }
    Ok(snapshot)
}
