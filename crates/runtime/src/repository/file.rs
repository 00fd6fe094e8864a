//! File-based SnapshotRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::{RepositoryError, Result, SnapshotRepository};
use crate::session::{BattleId, SessionSnapshot};

/// File-based implementation of SnapshotRepository.
///
/// # File Format
///
/// Snapshots are stored as `battle_{id}.bin` in bincode format. Writes go to a
/// temp file first and are renamed into place, so a crash never leaves a
/// half-written snapshot behind.
pub struct FileSnapshotRepository {
    base_dir: PathBuf,
}

impl FileSnapshotRepository {
    /// Create a new file-based snapshot repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn snapshot_path(&self, id: BattleId) -> PathBuf {
        self.base_dir.join(format!("battle_{}.bin", id))
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let path = self.snapshot_path(snapshot.id);
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(snapshot)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved battle[{}] to {}", snapshot.id, path.display());

        Ok(())
    }

    fn load(&self, id: BattleId) -> Result<Option<SessionSnapshot>> {
        let path = self.snapshot_path(id);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let snapshot: SessionSnapshot = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        if snapshot.id != id {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds battle {}",
                path.display(),
                snapshot.id
            )));
        }

        tracing::debug!("Loaded battle[{}] from {}", id, path.display());

        Ok(Some(snapshot))
    }

    fn exists(&self, id: BattleId) -> bool {
        self.snapshot_path(id).exists()
    }

    fn delete(&self, id: BattleId) -> Result<()> {
        let path = self.snapshot_path(id);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted battle[{}]", id);
        }

        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<BattleId>> {
        let mut ids = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id_str) = filename
                    .strip_prefix("battle_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(id) = id_str.parse::<u64>()
            {
                ids.push(BattleId(id));
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}
