use uuid::Uuid;

pub type GroupId = Uuid;
pub type MemberId = Uuid;
pub type CategoryId = Uuid;
pub type TransactionId = Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Records that live inside exactly one household group.
pub trait GroupScoped {
    fn group_id(&self) -> GroupId;

    fn belongs_to(&self, group: GroupId) -> bool {
        self.group_id() == group
    }
}
