//! Hero catalog loader.

use std::path::Path;

use battle_core::HeroTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Hero catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroCatalog {
    pub heroes: Vec<HeroTemplate>,
}

/// Loader for hero templates from RON files.
pub struct HeroLoader;

impl HeroLoader {
    /// Load hero catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing HeroCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<HeroTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<HeroTemplate>> {
        let catalog: HeroCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse hero catalog RON: {}", e))?;

        Ok(catalog.heroes)
    }
}
