//! Errors surfaced by the runtime API.

use arena_core::{EquipError, SessionError};

use crate::repository::RepositoryError;

/// Errors surfaced while driving battles or mutating equipment.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The turn protocol or an action precondition rejected the request.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// An equipment operation was rejected before any mutation.
    #[error(transparent)]
    Equip(#[from] EquipError),

    /// The persistence collaborator failed; retry is safe.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A referenced catalog entry does not exist.
    #[error(transparent)]
    Catalog(#[from] arena_core::CatalogError),

    /// The session worker is gone (battle torn down).
    #[error("the battle session is closed")]
    SessionClosed,

    /// Joining a worker task failed.
    #[error("worker task failed: {0}")]
    WorkerJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
