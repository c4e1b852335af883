//! Persistence adapters for the player record.
//!
//! The core expresses every durable mutation as an [`arena_core::Op`]
//! batch; repositories commit a batch atomically or not at all. Two
//! implementations ship here: an in-memory repository for tests and local
//! runs, and a JSON-file repository whose commit is a write-then-rename.

mod error;
mod file;
mod memory;
mod traits;

pub use error::RepositoryError;
pub use file::FilePlayerRepo;
pub use memory::InMemoryPlayerRepo;
pub use traits::PlayerRepository;
