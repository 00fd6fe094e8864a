//! Content loaders for reading battle data from files.
//!
//! Each loader turns one RON/TOML file into battle-core types. The
//! [`ContentFactory`] ties them together for a data directory.

pub mod abilities;
pub mod config;
pub mod encounters;
pub mod enemies;
pub mod factory;
pub mod heroes;

pub use abilities::{AbilityCatalog, AbilityLoader};
pub use config::ConfigLoader;
pub use encounters::{EncounterCatalog, EncounterLoader};
pub use enemies::{EnemyCatalog, EnemyLoader};
pub use factory::ContentFactory;
pub use heroes::{HeroCatalog, HeroLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
