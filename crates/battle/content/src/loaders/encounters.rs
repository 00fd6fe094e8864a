//! Encounter catalog loader.

use std::path::Path;

use battle_core::EncounterTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Encounter catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterCatalog {
    pub encounters: Vec<EncounterTemplate>,
}

/// Loader for encounter templates from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    /// Load encounter catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing EncounterCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<EncounterTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EncounterTemplate>> {
        let catalog: EncounterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter catalog RON: {}", e))?;

        Ok(catalog.encounters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_keep_declaration_order() {
        let encounters = EncounterLoader::parse(
            r#"(encounters: [(id: "camp", enemies: [(enemy: "b", count: 2), (enemy: "a", count: 1)])])"#,
        )
        .unwrap();

        let camp = &encounters[0];
        assert_eq!(camp.name, "");
        assert_eq!(camp.enemies[0].enemy, "b");
        assert_eq!(camp.enemies[0].count, 2);
        assert_eq!(camp.enemies[1].enemy, "a");
    }
}
