//! Caller-owned session state.
//!
//! The group an authenticated user belongs to is looked up once per session and
//! memoized here rather than in process-wide state, so a logout (or switching
//! users) can never leak one household's group id into another session.

use tracing::debug;
use uuid::Uuid;

use crate::domain::GroupId;
use crate::errors::TogetherError;
use crate::storage::Store;

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    user_id: Option<Uuid>,
    group_id: Option<GroupId>,
}

impl SessionContext {
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            group_id: None,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    /// Group of the signed-in user, resolved through the store on first use.
    pub fn current_group_id(&mut self, store: &dyn Store) -> Result<Option<GroupId>, TogetherError> {
        if let Some(group_id) = self.group_id {
            return Ok(Some(group_id));
        }
        let Some(user_id) = self.user_id else {
            return Ok(None);
        };
        let resolved = store.group_for_user(user_id)?;
        if let Some(group_id) = resolved {
            debug!(%user_id, %group_id, "resolved session group");
            self.group_id = Some(group_id);
        }
        Ok(resolved)
    }

    /// Like [`current_group_id`](Self::current_group_id) but treats a missing group as an error.
    pub fn require_group(&mut self, store: &dyn Store) -> Result<GroupId, TogetherError> {
        self.current_group_id(store)?
            .ok_or(TogetherError::NoActiveGroup)
    }

    /// Drops the memoized group, e.g. after the user joined another group.
    pub fn invalidate(&mut self) {
        self.group_id = None;
    }

    /// Ends the session: forgets both the user and the cached group.
    pub fn logout(&mut self) {
        debug!(user_id = ?self.user_id, "session logged out");
        self.user_id = None;
        self.group_id = None;
    }
}
