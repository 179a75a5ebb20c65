//! Error types raised by repository implementations.

use swnr_core::ActorId;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("actor repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("actor id '{0}' cannot be stored")]
    InvalidId(ActorId),

    #[error("actor {0} not found")]
    NotFound(ActorId),

    #[error("actor {id} changed underneath: expected revision {expected}, found {found}")]
    RevisionConflict { id: ActorId, expected: u64, found: u64 },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
