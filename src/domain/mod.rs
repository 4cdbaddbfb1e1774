//! Value records produced by the store and consumed by the aggregation engine.

pub mod category;
pub mod common;
pub mod group;
pub mod member;
pub mod transaction;

pub use category::Category;
pub use common::{
    CategoryId, Displayable, GroupId, GroupScoped, Identifiable, MemberId, NamedEntity,
    TransactionId,
};
pub use group::{Group, InviteCode};
pub use member::Member;
pub use transaction::{Transaction, TransactionType};
