//! Repository layer for in-flight battles.
//!
//! Repositories hold data that CHANGES while a battle runs: session snapshots
//! for resuming after a restart or reconnect. Static battle content (heroes,
//! abilities, encounters) comes from `battle-content`, not from here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSnapshotRepository;
pub use memory::InMemorySnapshotRepo;
pub use traits::SnapshotRepository;
