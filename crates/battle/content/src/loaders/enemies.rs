//! Enemy catalog loader.

use std::path::Path;

use battle_core::EnemyTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyTemplate>,
}

/// Loader for enemy templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load enemy catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing EnemyCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EnemyTemplate>> {
        let catalog: EnemyCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        Ok(catalog.enemies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summon_is_optional() {
        let enemies = EnemyLoader::parse(
            r#"(enemies: [
                (id: "imp", name: "Imp", max_hp: 50.0, attack_interval: 1.0, damage: 3.0, armor: 0.0, magic_resist: 0.0),
                (
                    id: "warlock",
                    name: "Warlock",
                    max_hp: 900.0,
                    attack_interval: 3.0,
                    damage: 6.0,
                    armor: 5.0,
                    magic_resist: 0.2,
                    summon: Some((template: "imp", interval: 8.0)),
                ),
            ])"#,
        )
        .unwrap();

        assert!(enemies[0].summon.is_none());
        let summon = enemies[1].summon.as_ref().unwrap();
        assert_eq!(summon.template, "imp");
        assert_eq!(summon.interval, 8.0);
    }
}
