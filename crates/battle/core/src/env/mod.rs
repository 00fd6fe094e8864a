//! Read-only inputs the engine consumes: templates, status rules and randomness.
//!
//! The [`BattleEnv`] aggregate bundles the template resolver with the status
//! catalog so resolution code reaches both without knowing where they live.
mod oracle;
mod rng;
mod tables;
mod templates;

pub use oracle::TemplateOracle;
pub use rng::{PcgRng, RandomSource};
#[cfg(any(test, feature = "test-utils"))]
pub use rng::ScriptedRolls;
pub use tables::TemplateTables;
pub use templates::{
    AbilityKind, AbilityTemplate, EncounterEntry, EncounterTemplate, EnemyTemplate, HeroId,
    HeroTemplate, StatBonuses, StatusOnHit, SummonAbility, TargetMode, Trigger,
};

use crate::status::StatusCatalog;

/// Aggregates the read-only collaborators needed by a tick.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    templates: &'a dyn TemplateOracle,
    statuses: &'a StatusCatalog,
}

impl<'a> BattleEnv<'a> {
    pub fn new(templates: &'a dyn TemplateOracle, statuses: &'a StatusCatalog) -> Self {
        Self {
            templates,
            statuses,
        }
    }

    pub fn templates(&self) -> &'a dyn TemplateOracle {
        self.templates
    }

    pub fn statuses(&self) -> &'a StatusCatalog {
        self.statuses
    }

    pub fn hero(&self, id: HeroId) -> Option<&'a HeroTemplate> {
        self.templates.hero(id)
    }

    pub fn enemy(&self, id: &str) -> Option<&'a EnemyTemplate> {
        self.templates.enemy(id)
    }

    pub fn ability(&self, id: &str) -> Option<&'a AbilityTemplate> {
        self.templates.ability(id)
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv")
            .field("statuses", &self.statuses)
            .finish_non_exhaustive()
    }
}
