//! Transitions fired when a timer crosses its threshold.
//!
//! Every function here is total: missing templates are skipped, never
//! reported. Each one prunes dead enemies and re-evaluates the result after it
//! touches HP, and does nothing once a result is set.
mod attack;
mod buffs;
mod enemy;
mod spell;

pub use attack::{resolve_basic_attack, resolve_basic_attacks};
pub use buffs::process_status_effects;
pub use enemy::{resolve_enemy_actions, resolve_summons};
pub use spell::{resolve_spell, select_spell};

use crate::env::{AbilityTemplate, BattleEnv, StatusOnHit};
use crate::formulas::{self, Defenses};
use crate::state::{BuffApplied, CombatEvent, CombatLog, EnemyInstance, HeroInstance, UnitRef};
use crate::status::StatusCatalog;

pub(crate) fn hero_defenses(env: &BattleEnv<'_>, hero: &HeroInstance) -> Defenses {
    let base = env
        .hero(hero.hero_id)
        .map(|t| t.base_defenses())
        .unwrap_or_default();
    env.statuses().modifiers(&hero.buffs).defenses(base)
}

pub(crate) fn enemy_defenses(env: &BattleEnv<'_>, enemy: &EnemyInstance) -> Defenses {
    let base = env
        .enemy(&enemy.template)
        .map(|t| t.base_defenses())
        .unwrap_or_default();
    env.statuses().modifiers(&enemy.buffs).defenses(base)
}

/// Magnitude carried by a status applied through `ability`.
///
/// An explicit magnitude wins. Otherwise damage, heal and shield effects take
/// the ability's damage plus spell power, fixed at cast time.
pub(crate) fn status_magnitude(
    statuses: &StatusCatalog,
    on_hit: &StatusOnHit,
    ability: &AbilityTemplate,
    spell_power: f64,
) -> Option<f64> {
    if on_hit.magnitude.is_some() {
        return on_hit.magnitude;
    }
    let def = statuses.get(&on_hit.effect)?;
    if !def.scales_with_ability() {
        return None;
    }
    ability
        .base_damage
        .map(|base| formulas::spell_damage(base, spell_power))
}

/// Logs a status application unless the unit had no room for it.
pub(crate) fn log_status(
    log: &mut CombatLog,
    time: f64,
    applied: BuffApplied,
    unit: UnitRef,
    on_hit: &StatusOnHit,
) {
    if applied == BuffApplied::Dropped {
        return;
    }
    log.push(
        time,
        CombatEvent::StatusApplied {
            unit,
            effect: on_hit.effect.clone(),
            duration: on_hit.duration,
        },
    );
}
