//! Map-backed [`TemplateOracle`] used by loaders and test fixtures.

use std::collections::HashMap;

use super::{
    AbilityTemplate, EncounterTemplate, EnemyTemplate, HeroId, HeroTemplate, TemplateOracle,
};

/// Owned template tables.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateTables {
    heroes: HashMap<HeroId, HeroTemplate>,
    enemies: HashMap<String, EnemyTemplate>,
    abilities: HashMap<String, AbilityTemplate>,
    encounters: HashMap<String, EncounterTemplate>,
}

impl TemplateTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_hero(&mut self, hero: HeroTemplate) {
        self.heroes.insert(hero.id, hero);
    }

    pub fn insert_enemy(&mut self, enemy: EnemyTemplate) {
        self.enemies.insert(enemy.id.clone(), enemy);
    }

    pub fn insert_ability(&mut self, ability: AbilityTemplate) {
        self.abilities.insert(ability.id.clone(), ability);
    }

    pub fn insert_encounter(&mut self, encounter: EncounterTemplate) {
        self.encounters.insert(encounter.id.clone(), encounter);
    }

    pub fn with_hero(mut self, hero: HeroTemplate) -> Self {
        self.insert_hero(hero);
        self
    }

    pub fn with_enemy(mut self, enemy: EnemyTemplate) -> Self {
        self.insert_enemy(enemy);
        self
    }

    pub fn with_ability(mut self, ability: AbilityTemplate) -> Self {
        self.insert_ability(ability);
        self
    }

    pub fn with_encounter(mut self, encounter: EncounterTemplate) -> Self {
        self.insert_encounter(encounter);
        self
    }

    /// Hero ids in ascending order.
    pub fn hero_ids(&self) -> Vec<HeroId> {
        let mut ids: Vec<_> = self.heroes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Encounter ids in ascending order.
    pub fn encounter_ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.encounters.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    // Unordered views for cross-reference checks.

    pub fn heroes(&self) -> impl Iterator<Item = &HeroTemplate> {
        self.heroes.values()
    }

    pub fn enemies(&self) -> impl Iterator<Item = &EnemyTemplate> {
        self.enemies.values()
    }

    pub fn abilities(&self) -> impl Iterator<Item = &AbilityTemplate> {
        self.abilities.values()
    }

    pub fn encounters(&self) -> impl Iterator<Item = &EncounterTemplate> {
        self.encounters.values()
    }
}

impl TemplateOracle for TemplateTables {
    fn hero(&self, id: HeroId) -> Option<&HeroTemplate> {
        self.heroes.get(&id)
    }

    fn enemy(&self, id: &str) -> Option<&EnemyTemplate> {
        self.enemies.get(id)
    }

    fn ability(&self, id: &str) -> Option<&AbilityTemplate> {
        self.abilities.get(id)
    }

    fn encounter(&self, id: &str) -> Option<&EncounterTemplate> {
        self.encounters.get(id)
    }
}
