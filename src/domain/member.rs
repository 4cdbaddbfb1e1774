use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A person attributable to transactions inside one group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub group_id: GroupId,
    pub name: String,
    pub avatar: String,
    pub color: String,
    pub bg_color: String,
}

impl Member {
    pub fn new(group_id: GroupId, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            name: name.into(),
            avatar: avatar.into(),
            color: "#3B82F6".into(),
            bg_color: "#3B82F6".into(),
        }
    }

    pub fn with_colors(mut self, color: impl Into<String>, bg_color: impl Into<String>) -> Self {
        self.color = color.into();
        self.bg_color = bg_color.into();
        self
    }
}

impl Identifiable for Member {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Member {
    fn name(&self) -> &str {
        &self.name
    }
}

impl GroupScoped for Member {
    fn group_id(&self) -> GroupId {
        self.group_id
    }
}

impl Displayable for Member {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.avatar)
    }
}
