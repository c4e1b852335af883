//! Error types raised by repository implementations.

use arena_core::PlayerId;

/// Errors surfaced by repository implementations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The atomic commit could not be applied. Nothing was written; the
    /// caller's in-memory state is still valid and retry is safe.
    #[error("atomic commit failed for {player}: {reason}")]
    Conflict { player: PlayerId, reason: String },

    #[error("no record for {0}")]
    NotFound(PlayerId),

    #[error("player repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
