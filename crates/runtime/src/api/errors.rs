//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories and the refresh
//! engine so clients can bubble them up with consistent context.

use swnr_core::{ActorId, EngineError, ErrorSeverity, RefreshError, ValidationError};
use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("refresh worker command channel closed")]
    CommandChannelClosed,

    #[error("refresh worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("refresh worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a repository to be configured before building")]
    MissingRepository,

    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Refresh(#[from] RefreshError),

    #[error(transparent)]
    InvalidActor(#[from] ValidationError),
}

impl RuntimeError {
    /// Severity of the failure, for logging and exit codes.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Refresh(e) => e.severity(),
            RuntimeError::InvalidActor(e) => e.severity(),
            RuntimeError::ActorNotFound(_) => ErrorSeverity::Validation,
            RuntimeError::Repository(RepositoryError::RevisionConflict { .. }) => {
                ErrorSeverity::Recoverable
            }
            _ => ErrorSeverity::Internal,
        }
    }
}
