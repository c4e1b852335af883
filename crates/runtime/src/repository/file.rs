//! JSON-file PlayerRepository implementation.
//!
//! One JSON document per player under a base directory. Commits rewrite
//! the document through a temp file followed by a rename, so a crash
//! mid-commit leaves the previous document intact.

use std::fs;
use std::path::{Path, PathBuf};

use arena_core::{Op, PlayerId, PlayerState};

use super::error::{RepositoryError, Result};
use super::traits::PlayerRepository;

/// File-backed implementation of [`PlayerRepository`].
pub struct FilePlayerRepo {
    base_dir: PathBuf,
}

impl FilePlayerRepo {
    /// Opens (and creates, if needed) a repository rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn path_for(&self, player: PlayerId) -> PathBuf {
        self.base_dir.join(format!("player_{}.json", player.0))
    }

    fn read(&self, player: PlayerId) -> Result<PlayerState> {
        let path = self.path_for(player);
        if !path.exists() {
            return Err(RepositoryError::NotFound(player));
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| RepositoryError::Json(e.to_string()))
    }

    fn write(&self, player: PlayerId, state: &PlayerState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;

        // Write-then-rename keeps the previous document until the new one
        // is durable.
        let path = self.path_for(player);
        let tmp = tmp_path(&path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[async_trait::async_trait]
impl PlayerRepository for FilePlayerRepo {
    async fn load(&self, player: PlayerId) -> Result<PlayerState> {
        self.read(player)
    }

    async fn put(&self, player: PlayerId, state: &PlayerState) -> Result<()> {
        self.write(player, state)
    }

    async fn commit_atomic(&self, player: PlayerId, ops: &[Op]) -> Result<()> {
        let current = self.read(player)?;
        let next = current
            .with_ops(ops)
            .map_err(|e| RepositoryError::Conflict {
                player,
                reason: e.to_string(),
            })?;
        self.write(player, &next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::StatBlock;

    #[tokio::test]
    async fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FilePlayerRepo::new(dir.path()).unwrap();
        let id = PlayerId(7);

        let mut state = PlayerState::new(StatBlock::default());
        state.coins = 40;
        repo.put(id, &state).await.unwrap();

        repo.commit_atomic(id, &[Op::AdjustCoins(-15)]).await.unwrap();
        let loaded = repo.load(id).await.unwrap();
        assert_eq!(loaded.coins, 25);
    }

    #[tokio::test]
    async fn failed_commit_leaves_the_document_alone() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FilePlayerRepo::new(dir.path()).unwrap();
        let id = PlayerId(7);
        repo.put(id, &PlayerState::new(StatBlock::default()))
            .await
            .unwrap();

        let err = repo
            .commit_atomic(id, &[Op::AdjustXp(10), Op::AdjustCoins(-5)])
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));

        let loaded = repo.load(id).await.unwrap();
        assert_eq!(loaded.xp, 0);
        assert_eq!(loaded.coins, 0);
    }
}
