//! Template resolver contract.

use super::{AbilityTemplate, EncounterTemplate, EnemyTemplate, HeroId, HeroTemplate};

/// Read-only template lookup injected by the caller.
///
/// The engine never loads templates itself. Lookups that miss return `None`;
/// the constructor turns misses into errors while the tick path skips them.
pub trait TemplateOracle: Send + Sync {
    fn hero(&self, id: HeroId) -> Option<&HeroTemplate>;

    fn enemy(&self, id: &str) -> Option<&EnemyTemplate>;

    fn ability(&self, id: &str) -> Option<&AbilityTemplate>;

    fn encounter(&self, id: &str) -> Option<&EncounterTemplate>;
}
