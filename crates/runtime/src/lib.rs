//! Runtime orchestration for deterministic battles.
//!
//! This crate drives `battle-core` battles on behalf of external callers:
//! request handlers ticking a live battle, and batch routines catching a
//! battle up after a client reconnects.
//!
//! Modules are organized by responsibility:
//! - [`session`] owns one battle with its seeded random stream
//! - [`store`] keeps live sessions, serializing ticks per battle
//! - [`repository`] persists session snapshots (memory and bincode files)
//! - [`replay`] records ticks and digests final states for comparison
pub mod error;
pub mod replay;
pub mod repository;
pub mod rng;
pub mod session;
pub mod store;

pub use error::{Result, RuntimeError};
pub use replay::{Replay, ReplayStep, state_digest};
pub use repository::{
    FileSnapshotRepository, InMemorySnapshotRepo, RepositoryError, SnapshotRepository,
};
pub use rng::RandSource;
pub use session::{BattleId, BattleOutcome, BattleRequest, BattleSession, SessionSnapshot};
pub use store::BattleStore;
