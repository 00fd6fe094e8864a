//! The bundle of content a battle runtime needs: templates, status effects,
//! and driving parameters.

use battle_core::{
    AbilityTemplate, BattleConfig, BattleEnv, EncounterTemplate, EnemyTemplate, HeroId,
    HeroTemplate, StatusCatalog, TemplateOracle, TemplateTables,
};

/// One broken reference or out-of-range value found by [`ContentCatalog::validate`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogIssue {
    #[error("hero {hero} references unknown ability `{ability}`")]
    UnknownAbility { hero: HeroId, ability: String },

    #[error("ability `{ability}` applies unknown status `{effect}`")]
    UnknownStatus { ability: String, effect: String },

    #[error("encounter `{encounter}` references unknown enemy `{enemy}`")]
    UnknownEnemy { encounter: String, enemy: String },

    #[error("encounter `{0}` spawns no enemies")]
    EmptyEncounter(String),

    #[error("enemy `{enemy}` summons unknown template `{template}`")]
    UnknownSummon { enemy: String, template: String },

    #[error("{owner}: {field} must be positive, got {value}")]
    NonPositive {
        owner: String,
        field: &'static str,
        value: f64,
    },
}

/// Every issue found in a catalog, sorted by message.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("content catalog has {} issue(s): {}", .0.len(), join_issues(.0))]
pub struct CatalogError(pub Vec<CatalogIssue>);

fn join_issues(issues: &[CatalogIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Clone, Debug)]
pub struct ContentCatalog {
    templates: TemplateTables,
    statuses: StatusCatalog,
    config: BattleConfig,
}

impl ContentCatalog {
    /// Pairs templates with the standard status effects.
    pub fn new(templates: TemplateTables, config: BattleConfig) -> Self {
        Self {
            templates,
            statuses: StatusCatalog::standard(),
            config,
        }
    }

    pub fn with_statuses(mut self, statuses: StatusCatalog) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    /// The content shipped with the crate.
    #[cfg(feature = "loaders")]
    pub fn builtin() -> crate::loaders::LoadResult<Self> {
        use crate::loaders::{
            AbilityLoader, ConfigLoader, EncounterLoader, EnemyLoader, HeroLoader,
        };

        let mut tables = TemplateTables::new();
        for hero in HeroLoader::parse(include_str!("../data/heroes.ron"))? {
            tables.insert_hero(hero);
        }
        for ability in AbilityLoader::parse(include_str!("../data/abilities.ron"))? {
            tables.insert_ability(ability);
        }
        for enemy in EnemyLoader::parse(include_str!("../data/enemies.ron"))? {
            tables.insert_enemy(enemy);
        }
        for encounter in EncounterLoader::parse(include_str!("../data/encounters.ron"))? {
            tables.insert_encounter(encounter);
        }
        let config = ConfigLoader::parse(include_str!("../data/config.toml"))?;

        let catalog = Self::new(tables, config);
        catalog.ensure_valid()?;
        Ok(catalog)
    }

    pub fn templates(&self) -> &TemplateTables {
        &self.templates
    }

    pub fn statuses(&self) -> &StatusCatalog {
        &self.statuses
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Resolver bundle borrowed from this catalog.
    pub fn env(&self) -> BattleEnv<'_> {
        BattleEnv::new(&self.templates, &self.statuses)
    }

    /// Checks every cross reference and interval.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        positive("config", "tick_step", self.config.tick_step, &mut issues);
        for hero in self.templates.heroes() {
            self.check_hero(hero, &mut issues);
        }
        for ability in self.templates.abilities() {
            self.check_ability(ability, &mut issues);
        }
        for enemy in self.templates.enemies() {
            self.check_enemy(enemy, &mut issues);
        }
        for encounter in self.templates.encounters() {
            self.check_encounter(encounter, &mut issues);
        }
        issues.sort_by_cached_key(|issue| issue.to_string());
        issues
    }

    pub fn ensure_valid(&self) -> Result<(), CatalogError> {
        let issues = self.validate();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(CatalogError(issues))
        }
    }

    fn check_hero(&self, hero: &HeroTemplate, issues: &mut Vec<CatalogIssue>) {
        let owner = format!("hero {}", hero.id);
        positive(&owner, "attack_interval", hero.attack_interval, issues);
        positive(&owner, "max_hp", hero.max_hp, issues);
        if let Some(interval) = hero.spell_interval {
            positive(&owner, "spell_interval", interval, issues);
        }
        for ability in &hero.abilities {
            if self.templates.ability(ability).is_none() {
                issues.push(CatalogIssue::UnknownAbility {
                    hero: hero.id,
                    ability: ability.clone(),
                });
            }
        }
    }

    fn check_ability(&self, ability: &AbilityTemplate, issues: &mut Vec<CatalogIssue>) {
        if let Some(status) = &ability.status_on_hit {
            if self.statuses.get(&status.effect).is_none() {
                issues.push(CatalogIssue::UnknownStatus {
                    ability: ability.id.clone(),
                    effect: status.effect.clone(),
                });
            }
            positive(&format!("ability `{}`", ability.id), "duration", status.duration, issues);
        }
    }

    fn check_enemy(&self, enemy: &EnemyTemplate, issues: &mut Vec<CatalogIssue>) {
        let owner = format!("enemy `{}`", enemy.id);
        positive(&owner, "attack_interval", enemy.attack_interval, issues);
        positive(&owner, "max_hp", enemy.max_hp, issues);
        if let Some(summon) = &enemy.summon {
            positive(&owner, "summon interval", summon.interval, issues);
            if self.templates.enemy(&summon.template).is_none() {
                issues.push(CatalogIssue::UnknownSummon {
                    enemy: enemy.id.clone(),
                    template: summon.template.clone(),
                });
            }
        }
    }

    fn check_encounter(&self, encounter: &EncounterTemplate, issues: &mut Vec<CatalogIssue>) {
        if encounter.enemies.iter().all(|entry| entry.count == 0) {
            issues.push(CatalogIssue::EmptyEncounter(encounter.id.clone()));
        }
        for entry in &encounter.enemies {
            if self.templates.enemy(&entry.enemy).is_none() {
                issues.push(CatalogIssue::UnknownEnemy {
                    encounter: encounter.id.clone(),
                    enemy: entry.enemy.clone(),
                });
            }
        }
    }
}

fn positive(owner: &str, field: &'static str, value: f64, issues: &mut Vec<CatalogIssue>) {
    if !(value.is_finite() && value > 0.0) {
        issues.push(CatalogIssue::NonPositive {
            owner: owner.to_string(),
            field,
            value,
        });
    }
}

impl TemplateOracle for ContentCatalog {
    fn hero(&self, id: HeroId) -> Option<&HeroTemplate> {
        self.templates.hero(id)
    }

    fn enemy(&self, id: &str) -> Option<&EnemyTemplate> {
        self.templates.enemy(id)
    }

    fn ability(&self, id: &str) -> Option<&AbilityTemplate> {
        self.templates.ability(id)
    }

    fn encounter(&self, id: &str) -> Option<&EncounterTemplate> {
        self.templates.encounter(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broken() -> ContentCatalog {
        let tables = TemplateTables::new()
            .with_hero(HeroTemplate::new(HeroId(1), "a").with_ability("missing"))
            .with_ability(AbilityTemplate::active("hex").with_status("frog", 2.0, None))
            .with_enemy(EnemyTemplate::new("boss", 100.0, 0.0, 1.0).with_summon("ghost", 5.0))
            .with_encounter(EncounterTemplate::new("empty"))
            .with_encounter(EncounterTemplate::new("lost").with_enemy("nobody", 1));
        ContentCatalog::new(tables, BattleConfig::default())
    }

    #[test]
    fn reports_every_broken_reference() {
        let issues = broken().validate();

        assert!(issues.contains(&CatalogIssue::UnknownAbility {
            hero: HeroId(1),
            ability: "missing".into()
        }));
        assert!(issues.contains(&CatalogIssue::UnknownStatus {
            ability: "hex".into(),
            effect: "frog".into()
        }));
        assert!(issues.contains(&CatalogIssue::UnknownSummon {
            enemy: "boss".into(),
            template: "ghost".into()
        }));
        assert!(issues.contains(&CatalogIssue::EmptyEncounter("empty".into())));
        assert!(issues.contains(&CatalogIssue::UnknownEnemy {
            encounter: "lost".into(),
            enemy: "nobody".into()
        }));
        assert!(issues.iter().any(|i| matches!(
            i,
            CatalogIssue::NonPositive { field: "attack_interval", .. }
        )));
    }

    #[test]
    fn error_lists_issue_count() {
        let err = broken().ensure_valid().unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with(&format!("content catalog has {} issue(s): ", err.0.len())));
        assert!(message.contains("; encounter `empty` spawns no enemies"));
    }

    #[test]
    fn zero_tick_step_is_rejected() {
        let tables = TemplateTables::new()
            .with_enemy(EnemyTemplate::new("rat", 10.0, 1.0, 1.0))
            .with_encounter(EncounterTemplate::new("rats").with_enemy("rat", 1));
        let catalog = ContentCatalog::new(tables, BattleConfig::default());
        assert!(catalog.ensure_valid().is_ok());

        let catalog = catalog.with_config(BattleConfig::default().with_tick_step(0.0));
        assert_eq!(
            catalog.validate(),
            vec![CatalogIssue::NonPositive {
                owner: "config".into(),
                field: "tick_step",
                value: 0.0,
            }]
        );
    }

    #[cfg(feature = "loaders")]
    #[test]
    fn builtin_content_is_consistent() {
        let catalog = ContentCatalog::builtin().unwrap();
        assert_eq!(
            catalog.templates().hero_ids(),
            vec![HeroId(25), HeroId(50), HeroId(99)]
        );
        assert!(catalog.encounter("skull_lord_boss").is_some());
        assert_eq!(catalog.config().combat_log_capacity, 200);
    }
}
