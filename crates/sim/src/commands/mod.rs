//! Subcommand implementations.

mod list;
mod replay;
mod run;
mod stats;

pub use list::List;
pub use replay::Replay;
pub use run::Run;
pub use stats::Stats;

use battle_core::{HeroId, TemplateOracle};

pub(crate) fn parse_roster(ids: &[u32]) -> Vec<HeroId> {
    ids.iter().copied().map(HeroId).collect()
}

pub(crate) fn hero_name(templates: &dyn TemplateOracle, id: HeroId) -> String {
    templates
        .hero(id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| format!("hero {id}"))
}
