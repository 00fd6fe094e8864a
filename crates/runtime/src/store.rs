//! Concurrent registry of live battles.
//!
//! Each session sits behind its own mutex: ticks of one battle are serialized,
//! while different battles can be driven from different threads at once. The
//! outer map lock is only held long enough to find or move a session.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use battle_content::ContentCatalog;
use battle_core::{BattleResult, TickIntents};

use crate::error::{Result, RuntimeError};
use crate::repository::SnapshotRepository;
use crate::session::{BattleId, BattleOutcome, BattleSession};

type SharedSession = Arc<Mutex<BattleSession>>;

#[derive(Default)]
pub struct BattleStore {
    sessions: RwLock<HashMap<BattleId, SharedSession>>,
}

impl BattleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: BattleSession) -> Result<()> {
        let mut sessions = self.sessions.write().map_err(|_| RuntimeError::LockPoisoned)?;
        let id = session.id();
        if sessions.contains_key(&id) {
            return Err(RuntimeError::DuplicateBattle(id));
        }
        sessions.insert(id, Arc::new(Mutex::new(session)));
        tracing::debug!(battle = %id, live = sessions.len(), "battle registered");
        Ok(())
    }

    pub fn contains(&self, id: BattleId) -> bool {
        self.sessions
            .read()
            .map(|sessions| sessions.contains_key(&id))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live battle ids in ascending order.
    pub fn ids(&self) -> Result<Vec<BattleId>> {
        let sessions = self.sessions.read().map_err(|_| RuntimeError::LockPoisoned)?;
        let mut ids: Vec<_> = sessions.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    /// Runs `f` with exclusive access to one session.
    pub fn with_session<T>(
        &self,
        id: BattleId,
        f: impl FnOnce(&mut BattleSession) -> Result<T>,
    ) -> Result<T> {
        let session = self.shared(id)?;
        let mut guard = session.lock().map_err(|_| RuntimeError::LockPoisoned)?;
        f(&mut guard)
    }

    pub fn tick(
        &self,
        id: BattleId,
        catalog: &ContentCatalog,
        dt: f64,
        intents: &TickIntents,
    ) -> Result<Option<BattleResult>> {
        self.with_session(id, |session| session.tick(catalog, dt, intents))
    }

    pub fn catch_up(
        &self,
        id: BattleId,
        catalog: &ContentCatalog,
        elapsed: f64,
    ) -> Result<Option<BattleResult>> {
        self.with_session(id, |session| session.catch_up(catalog, elapsed))
    }

    /// Removes a battle regardless of its state.
    pub fn remove(&self, id: BattleId) -> Result<BattleSession> {
        let shared = {
            let mut sessions = self.sessions.write().map_err(|_| RuntimeError::LockPoisoned)?;
            sessions.remove(&id).ok_or(RuntimeError::BattleNotFound(id))?
        };
        unwrap_shared(shared)
    }

    /// Removes every finished battle and returns their outcomes in id order.
    pub fn take_finished(&self) -> Result<Vec<BattleOutcome>> {
        let finished: Vec<SharedSession> = {
            let mut sessions = self.sessions.write().map_err(|_| RuntimeError::LockPoisoned)?;
            let mut ids = Vec::new();
            for (id, session) in sessions.iter() {
                let guard = session.lock().map_err(|_| RuntimeError::LockPoisoned)?;
                if guard.is_finished() {
                    ids.push(*id);
                }
            }
            ids.sort_unstable();
            ids.iter().filter_map(|id| sessions.remove(id)).collect()
        };

        let mut outcomes = Vec::with_capacity(finished.len());
        for shared in finished {
            let session = unwrap_shared(shared)?;
            if let Some(outcome) = session.outcome() {
                outcomes.push(outcome);
            }
        }
        if !outcomes.is_empty() {
            tracing::info!(count = outcomes.len(), "collected finished battles");
        }
        Ok(outcomes)
    }

    /// Writes a snapshot of every live battle.
    pub fn persist(&self, repo: &dyn SnapshotRepository) -> Result<usize> {
        let shared: Vec<SharedSession> = {
            let sessions = self.sessions.read().map_err(|_| RuntimeError::LockPoisoned)?;
            sessions.values().cloned().collect()
        };
        for session in &shared {
            let snapshot = session.lock().map_err(|_| RuntimeError::LockPoisoned)?.snapshot();
            repo.save(&snapshot)?;
        }
        tracing::debug!(count = shared.len(), "persisted battles");
        Ok(shared.len())
    }

    /// Restores every stored snapshot not already live. Returns how many were added.
    pub fn restore_all(&self, repo: &dyn SnapshotRepository) -> Result<usize> {
        let mut restored = 0;
        for id in repo.list_ids()? {
            if self.contains(id) {
                continue;
            }
            if let Some(snapshot) = repo.load(id)? {
                self.insert(BattleSession::restore(snapshot))?;
                restored += 1;
            }
        }
        Ok(restored)
    }

    fn shared(&self, id: BattleId) -> Result<SharedSession> {
        let sessions = self.sessions.read().map_err(|_| RuntimeError::LockPoisoned)?;
        sessions
            .get(&id)
            .cloned()
            .ok_or(RuntimeError::BattleNotFound(id))
    }
}

/// Takes the session out of its shared cell. A caller still inside
/// [`BattleStore::with_session`] keeps the cell alive, in which case the
/// session is copied out through its snapshot once that caller is done.
fn unwrap_shared(shared: SharedSession) -> Result<BattleSession> {
    match Arc::try_unwrap(shared) {
        Ok(mutex) => mutex.into_inner().map_err(|_| RuntimeError::LockPoisoned),
        Err(shared) => {
            let guard = shared.lock().map_err(|_| RuntimeError::LockPoisoned)?;
            Ok(BattleSession::restore(guard.snapshot()))
        }
    }
}
