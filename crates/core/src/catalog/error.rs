//! Errors raised when catalog lookups come back empty.

use super::{EnemyId, ItemId};

/// A referenced catalog entry does not exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("item {0} is not in the catalog")]
    ItemNotFound(ItemId),

    #[error("enemy {0} is not in the catalog")]
    EnemyNotFound(EnemyId),
}
