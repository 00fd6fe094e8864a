//! Per-tick status processing for both sides.

use crate::env::BattleEnv;
use crate::state::{BattleState, CombatEvent, UnitRef};

/// Ticks every buff on every living unit by `dt`, then settles deaths.
pub fn process_status_effects(state: &mut BattleState, env: &BattleEnv<'_>, dt: f64) {
    if state.result.is_some() {
        return;
    }
    let statuses = env.statuses();

    for (index, hero) in state.player.iter_mut().enumerate() {
        if !hero.is_alive() {
            continue;
        }
        let base = env
            .hero(hero.hero_id)
            .map(|t| t.base_defenses())
            .unwrap_or_default();
        statuses.tick_unit(&mut hero.vitals, &mut hero.buffs, base, dt);
        if !hero.is_alive() {
            tracing::debug!(hero = index, "hero died to status damage");
            state.log.push(
                state.elapsed,
                CombatEvent::Death {
                    unit: UnitRef::Hero(index),
                },
            );
        }
    }

    for enemy in state.enemy.iter_mut() {
        if !enemy.is_alive() {
            continue;
        }
        let base = env
            .enemy(&enemy.template)
            .map(|t| t.base_defenses())
            .unwrap_or_default();
        statuses.tick_unit(&mut enemy.vitals, &mut enemy.buffs, base, dt);
    }

    state.remove_dead_enemies();
}
