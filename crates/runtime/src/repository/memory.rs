//! In-memory SnapshotRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::repository::{RepositoryError, Result, SnapshotRepository};
use crate::session::{BattleId, SessionSnapshot};

/// In-memory implementation of SnapshotRepository.
#[derive(Default)]
pub struct InMemorySnapshotRepo {
    snapshots: RwLock<HashMap<BattleId, SessionSnapshot>>,
}

impl InMemorySnapshotRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotRepository for InMemorySnapshotRepo {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        snapshots.insert(snapshot.id, snapshot.clone());
        Ok(())
    }

    fn load(&self, id: BattleId) -> Result<Option<SessionSnapshot>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(snapshots.get(&id).cloned())
    }

    fn exists(&self, id: BattleId) -> bool {
        self.snapshots
            .read()
            .map(|snapshots| snapshots.contains_key(&id))
            .unwrap_or(false)
    }

    fn delete(&self, id: BattleId) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        snapshots.remove(&id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<BattleId>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<BattleId> = snapshots.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
