use thiserror::Error;

/// Error type shared by the store, configuration and report layers.
///
/// The aggregation engine itself never fails: dangling references and empty
/// baselines are part of each operation's return contract instead.
#[derive(Debug, Error)]
pub enum TogetherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid invite code: {0}")]
    InvalidInviteCode(String),
    #[error("No active group for the current session")]
    NoActiveGroup,
    #[error("Group not found: {0}")]
    GroupNotFound(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type Result<T> = std::result::Result<T, TogetherError>;
