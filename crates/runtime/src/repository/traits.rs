//! Repository contract for saving and loading battle snapshots.

use crate::repository::Result;
use crate::session::{BattleId, SessionSnapshot};

/// Repository for battle snapshot persistence.
///
/// One snapshot per battle id; saving again replaces the previous one.
pub trait SnapshotRepository: Send + Sync {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<()>;

    fn load(&self, id: BattleId) -> Result<Option<SessionSnapshot>>;

    fn exists(&self, id: BattleId) -> bool;

    /// Deleting a missing snapshot is not an error.
    fn delete(&self, id: BattleId) -> Result<()>;

    /// Stored battle ids in ascending order.
    fn list_ids(&self) -> Result<Vec<BattleId>>;
}
