//! Error types for the huddle ecosystem.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur in huddle operations.
#[derive(Error, Debug)]
pub enum HuddleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No member selected. Run `huddle use` to pick who you are.")]
    NoActiveMember,

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("The remote store has no schema yet. Run `huddle setup` for instructions.")]
    SetupRequired,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for huddle operations.
pub type HuddleResult<T> = Result<T, HuddleError>;
