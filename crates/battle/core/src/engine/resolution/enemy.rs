//! Enemy attacks on the focused hero and enemy summons.

use super::{enemy_defenses, hero_defenses};
use crate::env::{BattleEnv, RandomSource};
use crate::formulas::{self, DamageType};
use crate::setup::spawn_enemy;
use crate::state::{BattleState, CombatEvent, UnitRef};

/// Every ready living enemy attacks the focused hero, in enemy-list order.
///
/// Stops as soon as the focused hero dies. Evasion draws exactly one roll from
/// `rng` per attack against a defender with a positive evasion chance.
pub fn resolve_enemy_actions(
    state: &mut BattleState,
    env: &BattleEnv<'_>,
    rng: &mut dyn RandomSource,
) {
    if state.result.is_some() {
        return;
    }
    let statuses = env.statuses();
    let defender = state.focused_hero;

    for index in 0..state.enemy.len() {
        let Some(hero) = state.player.get(defender) else {
            break;
        };
        if !hero.is_alive() {
            break;
        }
        let enemy = &state.enemy[index];
        if !enemy.is_alive() {
            continue;
        }
        let Some(template) = env.enemy(&enemy.template) else {
            continue;
        };
        let enemy_mods = statuses.modifiers(&enemy.buffs);
        let interval =
            formulas::effective_interval(template.attack_interval, enemy_mods.attack_speed(0.0), None);
        if enemy.attack_timer < interval {
            continue;
        }

        let raw = enemy_mods.scale_attack_damage(enemy.attack_damage);
        state.enemy[index].attack_timer = 0.0;

        let evasion = statuses.modifiers(&hero.buffs).evasion_chance();
        if evasion > 0.0 && rng.next_unit() < evasion {
            state.log.push(
                state.elapsed,
                CombatEvent::Evaded {
                    enemy: index,
                    hero: defender,
                },
            );
            continue;
        }

        let dealt = formulas::mitigate(raw, DamageType::Physical, hero_defenses(env, hero));
        let hero_id = hero.hero_id;
        state.player[defender].vitals.take_hit(dealt);
        state.log.push(
            state.elapsed,
            CombatEvent::EnemyAttack {
                enemy: index,
                template: template.id.clone(),
                hero: defender,
                raw_damage: raw,
                damage: dealt,
            },
        );

        let reflect = env.hero(hero_id).and_then(|t| {
            t.abilities
                .iter()
                .filter_map(|id| env.ability(id))
                .find_map(|a| a.reflect_ratio().map(|ratio| (ratio, a.damage_type)))
        });
        if let Some((ratio, damage_type)) = reflect
            && ratio > 0.0
            && dealt > 0.0
        {
            let damage_type = damage_type.unwrap_or(DamageType::Physical);
            let returned = formulas::mitigate(
                dealt * ratio,
                damage_type,
                enemy_defenses(env, &state.enemy[index]),
            );
            state.enemy[index].vitals.take_hit(returned);
            state.log.push(
                state.elapsed,
                CombatEvent::ReturnDamage {
                    hero: defender,
                    enemy: index,
                    damage_type,
                    damage: returned,
                },
            );
        }

        if !state.player[defender].is_alive() {
            tracing::debug!(hero = defender, %hero_id, "hero died");
            state.log.push(
                state.elapsed,
                CombatEvent::Death {
                    unit: UnitRef::Hero(defender),
                },
            );
            break;
        }
    }

    state.remove_dead_enemies();
}

/// Spawns a level-scaled minion for every summoner whose spell timer is full.
pub fn resolve_summons(state: &mut BattleState, env: &BattleEnv<'_>) {
    if state.result.is_some() {
        return;
    }

    let mut spawns = Vec::new();
    for (index, enemy) in state.enemy.iter_mut().enumerate() {
        if !enemy.is_alive() {
            continue;
        }
        let (Some(summon), Some(timer)) = (&enemy.summon, enemy.spell_timer.as_mut()) else {
            continue;
        };
        if *timer < summon.interval {
            continue;
        }
        *timer = 0.0;
        if let Some(template) = env.enemy(&summon.template) {
            spawns.push((index, template));
        }
    }

    for (summoner, template) in spawns {
        state.enemy.push(spawn_enemy(template, state.level));
        state.log.push(
            state.elapsed,
            CombatEvent::Summon {
                summoner,
                template: template.id.clone(),
            },
        );
        tracing::debug!(summoner, template = %template.id, level = state.level, "enemy summoned");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{self, BRISTLEBACK, LINA};
    use crate::env::{EncounterTemplate, EnemyTemplate, ScriptedRolls};
    use crate::state::BattleResult;
    use crate::status::StatusCatalog;

    #[test]
    fn ready_enemy_hits_focused_hero_through_armor() {
        let tables = fixtures::tables();
        let statuses = StatusCatalog::standard();
        let env = fixtures::env(&tables, &statuses);
        let mut state = fixtures::battle(&tables, &[LINA, BRISTLEBACK], "wolf_pack");
        state.enemy[0].attack_timer = 3.0;
        state.enemy[1].attack_timer = 1.0;

        resolve_enemy_actions(&mut state, &env, &mut ScriptedRolls::new([0.0]));

        let expected = 100.0 - 4.0 * 100.0 / 101.0;
        assert!((state.player[0].vitals.current_hp - expected).abs() < 1e-9);
        assert_eq!(state.player[1].vitals.current_hp, 150.0);
        assert_eq!(state.enemy[0].attack_timer, 0.0);
        assert_eq!(state.enemy[1].attack_timer, 1.0);
    }

    #[test]
    fn attack_damage_debuff_weakens_enemy_hits() {
        let tables = fixtures::tables();
        let statuses = StatusCatalog::standard();
        let env = fixtures::env(&tables, &statuses);
        let mut state = fixtures::battle(&tables, &[LINA], "wolf_pack");
        state.enemy[0].buffs.apply("attack_damage_reduce", 5.0, Some(-0.5));
        state.enemy[0].attack_timer = 3.0;

        resolve_enemy_actions(&mut state, &env, &mut ScriptedRolls::new([0.0]));

        let expected = 100.0 - 2.0 * 100.0 / 101.0;
        assert!((state.player[0].vitals.current_hp - expected).abs() < 1e-9);
    }

    #[test]
    fn attack_speed_slow_stretches_enemy_interval() {
        let tables = fixtures::tables();
        let statuses = StatusCatalog::standard();
        let env = fixtures::env(&tables, &statuses);
        let mut state = fixtures::battle(&tables, &[LINA], "wolf_pack");
        state.enemy[0].buffs.apply("attack_speed_slow", 5.0, Some(-0.5));
        state.enemy[0].attack_timer = 3.0;

        resolve_enemy_actions(&mut state, &env, &mut ScriptedRolls::new([0.0]));
        assert_eq!(state.player[0].vitals.current_hp, 100.0);
        assert_eq!(state.enemy[0].attack_timer, 3.0);

        // 3s base over (1 - 0.5) speed.
        state.enemy[0].attack_timer = 6.0;
        resolve_enemy_actions(&mut state, &env, &mut ScriptedRolls::new([0.0]));
        assert!(state.player[0].vitals.current_hp < 100.0);
        assert_eq!(state.enemy[0].attack_timer, 0.0);
    }

    #[test]
    fn return_damage_reflects_mitigated_share() {
        let tables = fixtures::tables();
        let statuses = StatusCatalog::standard();
        let env = fixtures::env(&tables, &statuses);
        let mut state = fixtures::battle(&tables, &[BRISTLEBACK], "wolf_pack");
        state.enemy[0].attack_timer = 3.0;

        resolve_enemy_actions(&mut state, &env, &mut ScriptedRolls::new([0.0]));

        let hit = 4.0 * 100.0 / 104.0;
        let returned = hit * 0.2 * 100.0 / 115.0;
        assert!((state.player[0].vitals.current_hp - (150.0 - hit)).abs() < 1e-9);
        assert!((state.enemy[0].vitals.current_hp - (80.0 - returned)).abs() < 1e-9);
    }

    #[test]
    fn evasion_consumes_one_roll_per_attack() {
        let tables = fixtures::tables();
        let statuses = StatusCatalog::standard();
        let env = fixtures::env(&tables, &statuses);
        let mut state = fixtures::battle(&tables, &[LINA], "wolf_pack");
        state.player[0].buffs.apply("evasion", 5.0, Some(0.5));
        for enemy in &mut state.enemy {
            enemy.attack_timer = 3.0;
        }

        let mut rolls = ScriptedRolls::new([0.2, 0.9, 0.4]);
        resolve_enemy_actions(&mut state, &env, &mut rolls);

        assert_eq!(rolls.consumed(), 3);
        let evaded = state
            .log
            .iter()
            .filter(|e| matches!(e.event, CombatEvent::Evaded { .. }))
            .count();
        assert_eq!(evaded, 2);
        assert!((state.player[0].vitals.current_hp - (100.0 - 2.0 * 100.0 / 101.0)).abs() < 1e-9);
    }

    #[test]
    fn no_rolls_without_evasion() {
        let tables = fixtures::tables();
        let statuses = StatusCatalog::standard();
        let env = fixtures::env(&tables, &statuses);
        let mut state = fixtures::battle(&tables, &[LINA], "wolf_pack");
        state.enemy[0].attack_timer = 3.0;

        let mut rolls = ScriptedRolls::new([0.0]);
        resolve_enemy_actions(&mut state, &env, &mut rolls);
        assert_eq!(rolls.consumed(), 0);
    }

    #[test]
    fn processing_halts_when_focused_hero_dies() {
        let tables = fixtures::tables();
        let statuses = StatusCatalog::standard();
        let env = fixtures::env(&tables, &statuses);
        let mut state = fixtures::battle(&tables, &[LINA], "wolf_pack");
        state.player[0].vitals.current_hp = 1.0;
        for enemy in &mut state.enemy {
            enemy.attack_timer = 3.0;
        }

        resolve_enemy_actions(&mut state, &env, &mut ScriptedRolls::new([0.0]));

        assert_eq!(state.result, Some(BattleResult::Lose));
        assert_eq!(state.enemy[1].attack_timer, 3.0);
        assert!(matches!(
            state.log.last().map(|e| &e.event),
            Some(CombatEvent::Death { unit: UnitRef::Hero(0) })
        ));
    }

    #[test]
    fn summoner_spawns_scaled_minion_and_resets() {
        let tables = fixtures::tables()
            .with_enemy(
                EnemyTemplate::new("skull_lord", 2500.0, 4.0, 5.0).with_summon("small_wolf", 12.0),
            )
            .with_encounter(EncounterTemplate::new("crypt").with_enemy("skull_lord", 1));
        let statuses = StatusCatalog::standard();
        let env = fixtures::env(&tables, &statuses);
        let mut state = fixtures::battle(&tables, &[LINA], "crypt");
        state.level = 2;
        state.enemy[0].spell_timer = Some(11.9);

        resolve_summons(&mut state, &env);
        assert_eq!(state.enemy.len(), 1);

        state.enemy[0].spell_timer = Some(12.0);
        resolve_summons(&mut state, &env);

        assert_eq!(state.enemy.len(), 2);
        assert_eq!(state.enemy[0].spell_timer, Some(0.0));
        assert_eq!(state.enemy[1].template, "small_wolf");
        assert_eq!(state.enemy[1].vitals.max_hp, 60.0);
        assert_eq!(state.enemy[1].attack_timer, 0.0);
        assert!(state.log.iter().any(|e| matches!(
            &e.event,
            CombatEvent::Summon { summoner: 0, template } if template == "small_wolf"
        )));
    }
}
