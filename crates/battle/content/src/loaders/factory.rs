//! Content factory for building template tables from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, TemplateTables};

use crate::catalog::ContentCatalog;
use crate::loaders::{
    AbilityLoader, ConfigLoader, EncounterLoader, EnemyLoader, HeroLoader, LoadResult,
};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── heroes.ron
/// ├── abilities.ron
/// ├── enemies.ron
/// └── encounters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load hero templates from `heroes.ron`.
    pub fn load_heroes(&self) -> LoadResult<Vec<battle_core::HeroTemplate>> {
        let path = self.data_dir.join("heroes.ron");
        HeroLoader::load(&path)
    }

    /// Load ability templates from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<Vec<battle_core::AbilityTemplate>> {
        let path = self.data_dir.join("abilities.ron");
        AbilityLoader::load(&path)
    }

    /// Load enemy templates from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<Vec<battle_core::EnemyTemplate>> {
        let path = self.data_dir.join("enemies.ron");
        EnemyLoader::load(&path)
    }

    /// Load encounter templates from `encounters.ron`.
    pub fn load_encounters(&self) -> LoadResult<Vec<battle_core::EncounterTemplate>> {
        let path = self.data_dir.join("encounters.ron");
        EncounterLoader::load(&path)
    }

    /// Load all four template files into one table.
    ///
    /// Later entries with a duplicate id replace earlier ones.
    pub fn load_tables(&self) -> LoadResult<TemplateTables> {
        let mut tables = TemplateTables::new();
        for hero in self.load_heroes()? {
            tables.insert_hero(hero);
        }
        for ability in self.load_abilities()? {
            tables.insert_ability(ability);
        }
        for enemy in self.load_enemies()? {
            tables.insert_enemy(enemy);
        }
        for encounter in self.load_encounters()? {
            tables.insert_encounter(encounter);
        }
        Ok(tables)
    }

    /// Load templates and config, then check every cross reference.
    pub fn load_catalog(&self) -> LoadResult<ContentCatalog> {
        let catalog = ContentCatalog::new(self.load_tables()?, self.load_config()?);
        catalog.ensure_valid()?;
        tracing::debug!(
            data_dir = %self.data_dir.display(),
            heroes = catalog.templates().hero_ids().len(),
            encounters = catalog.templates().encounter_ids().len(),
            "loaded battle content"
        );
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_directory_names_the_file() {
        let factory = ContentFactory::new("/nonexistent/battle-data");
        let err = factory.load_heroes().unwrap_err();
        assert!(err.to_string().contains("heroes.ron"));
    }
}
