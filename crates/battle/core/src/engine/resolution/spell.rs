//! Active spells cast by the focused hero.

use super::{enemy_defenses, log_status, status_magnitude};
use crate::env::{AbilityTemplate, BattleEnv, HeroTemplate, TargetMode};
use crate::formulas::{self, DamageType};
use crate::state::{BattleState, Buffs, CombatEvent, UnitRef};

/// First castable ability at or after `cursor`, wrapping around the list.
///
/// Returns the ability's position in the hero's ability list.
pub fn select_spell<'a>(
    template: &HeroTemplate,
    cursor: usize,
    env: &BattleEnv<'a>,
) -> Option<(usize, &'a AbilityTemplate)> {
    let count = template.abilities.len();
    (0..count)
        .map(|offset| (cursor + offset) % count)
        .find_map(|pos| {
            env.ability(&template.abilities[pos])
                .filter(|a| a.is_castable())
                .map(|a| (pos, a))
        })
}

/// Casts the focused hero's next spell once its spell timer is full.
/// Returns whether a cast resolved.
pub fn resolve_spell(state: &mut BattleState, env: &BattleEnv<'_>) -> bool {
    if state.result.is_some() {
        return false;
    }
    let caster = state.focused_hero;
    let Some(hero) = state.player.get(caster) else {
        return false;
    };
    if !hero.is_alive() {
        return false;
    }
    let Some(template) = env.hero(hero.hero_id) else {
        return false;
    };
    let Some(interval) = template.effective_spell_interval() else {
        return false;
    };
    if hero.spell_timer < interval {
        return false;
    }
    let Some((pos, ability)) = select_spell(template, hero.spell_cursor, env) else {
        return false;
    };

    let spell_power = template.spell_power();
    match ability.target_mode() {
        Some(TargetMode::SingleEnemy) => cast_single(state, env, caster, template, ability),
        Some(TargetMode::AllEnemies) => cast_all(state, env, caster, template, ability),
        Some(TargetMode::Caster) => {
            if let Some(on_hit) = &ability.status_on_hit {
                let magnitude = status_magnitude(env.statuses(), on_hit, ability, spell_power);
                let hero = &mut state.player[caster];
                let applied = env.statuses().apply(
                    &mut hero.vitals,
                    &mut hero.buffs,
                    &on_hit.effect,
                    on_hit.duration,
                    magnitude,
                );
                log_status(&mut state.log, state.elapsed, applied, UnitRef::Hero(caster), on_hit);
            }
            log_cast(state, caster, template, ability, None, 0.0);
        }
        Some(TargetMode::LowestHpAlly) => cast_heal(state, env, caster, ability, spell_power),
        Some(TargetMode::Attacker | TargetMode::AttackedEnemy) | None => {
            log_cast(state, caster, template, ability, None, 0.0);
        }
    }

    let hero = &mut state.player[caster];
    hero.spell_timer = 0.0;
    hero.spell_cursor = (pos + 1) % template.abilities.len();
    state.remove_dead_enemies();
    true
}

fn spell_hit(
    env: &BattleEnv<'_>,
    template: &HeroTemplate,
    ability: &AbilityTemplate,
    caster_buffs: &Buffs,
) -> f64 {
    let base = ability.base_damage.unwrap_or(0.0);
    env.statuses()
        .modifiers(caster_buffs)
        .scale_spell_damage(formulas::spell_damage(base, template.spell_power()))
}

/// Damages one living enemy, mitigates it, and applies the on-hit status.
fn strike(
    state: &mut BattleState,
    env: &BattleEnv<'_>,
    target: usize,
    damage: f64,
    damage_type: DamageType,
    ability: &AbilityTemplate,
    spell_power: f64,
) -> f64 {
    let defenses = enemy_defenses(env, &state.enemy[target]);
    let dealt = formulas::mitigate(damage, damage_type, defenses);
    let enemy = &mut state.enemy[target];
    enemy.vitals.take_hit(dealt);

    if let Some(on_hit) = &ability.status_on_hit {
        let magnitude = status_magnitude(env.statuses(), on_hit, ability, spell_power);
        let applied = env.statuses().apply(
            &mut enemy.vitals,
            &mut enemy.buffs,
            &on_hit.effect,
            on_hit.duration,
            magnitude,
        );
        log_status(&mut state.log, state.elapsed, applied, UnitRef::Enemy(target), on_hit);
    }
    dealt
}

fn cast_single(
    state: &mut BattleState,
    env: &BattleEnv<'_>,
    caster: usize,
    template: &HeroTemplate,
    ability: &AbilityTemplate,
) {
    if state.enemy.is_empty() {
        log_cast(state, caster, template, ability, None, 0.0);
        return;
    }
    let target = state.target_index.min(state.enemy.len() - 1);
    let damage = spell_hit(env, template, ability, &state.player[caster].buffs);
    let damage_type = ability.damage_type.unwrap_or(DamageType::Pure);
    let dealt = strike(state, env, target, damage, damage_type, ability, template.spell_power());
    log_cast(state, caster, template, ability, Some(target), dealt);
}

fn cast_all(
    state: &mut BattleState,
    env: &BattleEnv<'_>,
    caster: usize,
    template: &HeroTemplate,
    ability: &AbilityTemplate,
) {
    let damage = spell_hit(env, template, ability, &state.player[caster].buffs);
    let damage_type = ability.damage_type.unwrap_or(DamageType::Pure);
    let mut total = 0.0;
    for target in 0..state.enemy.len() {
        if state.enemy[target].is_alive() {
            total += strike(state, env, target, damage, damage_type, ability, template.spell_power());
        }
    }
    log_cast(state, caster, template, ability, None, total);
}

fn cast_heal(
    state: &mut BattleState,
    env: &BattleEnv<'_>,
    caster: usize,
    ability: &AbilityTemplate,
    spell_power: f64,
) {
    let ally = state
        .living_heroes()
        .min_by(|(_, a), (_, b)| a.vitals.hp_fraction().total_cmp(&b.vitals.hp_fraction()))
        .map(|(i, _)| i);
    let Some(ally) = ally else {
        return;
    };

    let amount = formulas::spell_damage(ability.base_damage.unwrap_or(0.0), spell_power);
    let healed = state.player[ally].vitals.heal(amount);
    state.log.push(
        state.elapsed,
        CombatEvent::Heal {
            hero: caster,
            ability: ability.id.clone(),
            ally,
            amount: healed,
        },
    );

    if let Some(on_hit) = &ability.status_on_hit {
        let magnitude = status_magnitude(env.statuses(), on_hit, ability, spell_power);
        let hero = &mut state.player[ally];
        let applied = env.statuses().apply(
            &mut hero.vitals,
            &mut hero.buffs,
            &on_hit.effect,
            on_hit.duration,
            magnitude,
        );
        log_status(&mut state.log, state.elapsed, applied, UnitRef::Hero(ally), on_hit);
    }
}

fn log_cast(
    state: &mut BattleState,
    caster: usize,
    template: &HeroTemplate,
    ability: &AbilityTemplate,
    target: Option<usize>,
    damage: f64,
) {
    state.log.push(
        state.elapsed,
        CombatEvent::Spell {
            hero: caster,
            hero_id: template.id,
            ability: ability.id.clone(),
            target,
            damage_type: ability.damage_type,
            damage,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{self, BRISTLEBACK, DAZZLE, LINA};
    use crate::env::{HeroId, TemplateTables};
    use crate::status::StatusCatalog;

    fn ready(state: &mut BattleState, hero: usize, timer: f64) {
        state.focused_hero = hero;
        state.player[hero].spell_timer = timer;
    }

    #[test]
    fn single_target_spell_mitigates_and_stuns() {
        let tables = fixtures::tables();
        let statuses = StatusCatalog::standard();
        let env = fixtures::env(&tables, &statuses);
        let mut state = fixtures::battle(&tables, &[LINA], "wolf_pack");
        ready(&mut state, 0, 10.0);

        assert!(resolve_spell(&mut state, &env));

        // 100 magical against 25% resist.
        assert_eq!(state.enemy[0].vitals.current_hp, 5.0);
        assert!(state.enemy[0].buffs.has("stun"));
        assert_eq!(state.player[0].spell_timer, 0.0);
        assert!(state.log.iter().any(|e| matches!(
            &e.event,
            CombatEvent::Spell { ability, damage, .. } if ability == "laguna_blade" && *damage == 75.0
        )));
    }

    #[test]
    fn status_lands_on_surviving_target() {
        let tables = fixtures::tables();
        let statuses = StatusCatalog::standard();
        let env = fixtures::env(&tables, &statuses);
        let mut state = fixtures::battle(&tables, &[DAZZLE], "wolf_pack");
        ready(&mut state, 0, 8.0);

        resolve_spell(&mut state, &env);

        let wolf = &state.enemy[0];
        assert!((wolf.vitals.current_hp - (80.0 - 22.5)).abs() < 1e-9);
        assert!(wolf.buffs.has("stun"));
    }

    #[test]
    fn spell_waits_for_interval_and_focus() {
        let tables = fixtures::tables();
        let statuses = StatusCatalog::standard();
        let env = fixtures::env(&tables, &statuses);
        let mut state = fixtures::battle(&tables, &[BRISTLEBACK, LINA], "wolf_pack");

        state.player[1].spell_timer = 10.0;
        assert!(!resolve_spell(&mut state, &env), "lina is not focused");

        ready(&mut state, 1, 9.9);
        assert!(!resolve_spell(&mut state, &env));

        ready(&mut state, 0, 50.0);
        assert!(!resolve_spell(&mut state, &env), "no spell interval");
    }

    fn support_tables() -> TemplateTables {
        fixtures::tables()
            .with_hero(
                HeroTemplate::new(HeroId(1), "oracle")
                    .with_attack(1.0, 5.0)
                    .with_defenses(100.0, 0.0, 0.0)
                    .with_spell_interval(5.0)
                    .with_ability("purifying_flames")
                    .with_ability("fate_shield")
                    .with_ability("fortunes_end"),
            )
            .with_ability(
                AbilityTemplate::active("purifying_flames")
                    .with_target(TargetMode::LowestHpAlly)
                    .with_damage(DamageType::Magical, 40.0),
            )
            .with_ability(
                AbilityTemplate::active("fate_shield")
                    .with_target(TargetMode::Caster)
                    .with_damage(DamageType::Magical, 100.0)
                    .with_status("shield", 5.0, None),
            )
            .with_ability(
                AbilityTemplate::active("fortunes_end")
                    .with_target(TargetMode::AllEnemies)
                    .with_damage(DamageType::Pure, 10.0),
            )
    }

    #[test]
    fn abilities_rotate_through_the_cursor() {
        let tables = support_tables();
        let statuses = StatusCatalog::standard();
        let env = fixtures::env(&tables, &statuses);
        let mut state = fixtures::battle(&tables, &[HeroId(1), LINA], "wolf_pack");
        state.player[1].vitals.current_hp = 20.0;

        ready(&mut state, 0, 5.0);
        resolve_spell(&mut state, &env);
        assert_eq!(state.player[1].vitals.current_hp, 60.0);
        assert_eq!(state.player[0].spell_cursor, 1);

        ready(&mut state, 0, 5.0);
        resolve_spell(&mut state, &env);
        assert_eq!(state.player[0].vitals.shield_hp, 100.0);
        assert!(state.player[0].buffs.has("shield"));

        ready(&mut state, 0, 5.0);
        resolve_spell(&mut state, &env);
        assert_eq!(state.enemy[0].vitals.current_hp, 70.0);
        assert_eq!(state.enemy[1].vitals.current_hp, 20.0);
        assert_eq!(state.enemy[2].vitals.current_hp, 20.0);
        assert_eq!(state.player[0].spell_cursor, 0);
    }

    #[test]
    fn select_spell_skips_passives_and_wraps() {
        let tables = support_tables()
            .with_hero(
                HeroTemplate::new(HeroId(2), "mixed")
                    .with_spell_interval(5.0)
                    .with_ability("fortunes_end")
                    .with_ability("bristleback_return"),
            );
        let statuses = StatusCatalog::standard();
        let env = fixtures::env(&tables, &statuses);
        let template = env.hero(HeroId(2)).unwrap();

        let (pos, ability) = select_spell(template, 1, &env).unwrap();
        assert_eq!(pos, 0);
        assert_eq!(ability.id, "fortunes_end");
        assert!(select_spell(env.hero(BRISTLEBACK).unwrap(), 0, &env).is_none());
    }
}
