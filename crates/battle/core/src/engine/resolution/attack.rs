//! Hero basic attacks and on-attack passives.

use super::{enemy_defenses, log_status, status_magnitude};
use crate::env::{AbilityKind, AbilityTemplate, BattleEnv, TargetMode, Trigger};
use crate::formulas::{self, DamageType};
use crate::state::{BattleState, CombatEvent, UnitRef};

/// Basic attacks for every ready living hero in roster order.
pub fn resolve_basic_attacks(state: &mut BattleState, env: &BattleEnv<'_>) {
    for hero_index in 0..state.player.len() {
        if state.result.is_some() {
            return;
        }
        resolve_basic_attack(state, env, hero_index);
    }
}

/// One basic attack from `hero_index` on the shared target, if its attack
/// timer has reached the effective interval. Returns whether it fired.
pub fn resolve_basic_attack(state: &mut BattleState, env: &BattleEnv<'_>, hero_index: usize) -> bool {
    if state.result.is_some() || state.enemy.is_empty() {
        return false;
    }
    let Some(hero) = state.player.get(hero_index) else {
        return false;
    };
    if !hero.is_alive() {
        return false;
    }
    let Some(template) = env.hero(hero.hero_id) else {
        return false;
    };

    let modifiers = env.statuses().modifiers(&hero.buffs);
    let interval = formulas::effective_interval(
        template.attack_interval,
        modifiers.attack_speed(template.attack_speed()),
        None,
    );
    if hero.attack_timer < interval {
        return false;
    }

    let target = state.target_index.min(state.enemy.len() - 1);
    let raw = modifiers.scale_attack_damage(template.effective_attack_damage());
    let damage = formulas::off_focus_penalty(raw, target == state.enemy_focus);
    let defenses = enemy_defenses(env, &state.enemy[target]);
    let dealt = formulas::mitigate(damage, DamageType::Physical, defenses);

    state.enemy[target].vitals.take_hit(dealt);
    state.player[hero_index].attack_timer = 0.0;
    state.log.push(
        state.elapsed,
        CombatEvent::AutoAttack {
            hero: hero_index,
            hero_id: template.id,
            target,
            enemy: state.enemy[target].template.clone(),
            raw_damage: damage,
            damage: dealt,
        },
    );

    for ability in template
        .abilities
        .iter()
        .filter_map(|id| env.ability(id))
        .filter(|a| a.kind == AbilityKind::Passive && a.trigger == Trigger::OnAttack)
    {
        apply_on_attack(state, env, hero_index, target, ability, template.spell_power());
    }

    state.remove_dead_enemies();
    true
}

/// Bonus damage and status from an on-attack passive, landing on the enemy just hit.
fn apply_on_attack(
    state: &mut BattleState,
    env: &BattleEnv<'_>,
    hero_index: usize,
    target: usize,
    ability: &AbilityTemplate,
    spell_power: f64,
) {
    if !matches!(ability.target, None | Some(TargetMode::AttackedEnemy)) {
        return;
    }
    let hero_id = state.player[hero_index].hero_id;
    let defenses = enemy_defenses(env, &state.enemy[target]);

    if let Some(base) = ability.base_damage {
        let damage_type = ability.damage_type.unwrap_or(DamageType::Physical);
        let dealt = formulas::mitigate(
            formulas::spell_damage(base, spell_power),
            damage_type,
            defenses,
        );
        state.enemy[target].vitals.take_hit(dealt);
        state.log.push(
            state.elapsed,
            CombatEvent::Spell {
                hero: hero_index,
                hero_id,
                ability: ability.id.clone(),
                target: Some(target),
                damage_type: Some(damage_type),
                damage: dealt,
            },
        );
    }

    if let Some(on_hit) = &ability.status_on_hit {
        let magnitude = status_magnitude(env.statuses(), on_hit, ability, spell_power);
        let enemy = &mut state.enemy[target];
        let applied = env.statuses().apply(
            &mut enemy.vitals,
            &mut enemy.buffs,
            &on_hit.effect,
            on_hit.duration,
            magnitude,
        );
        log_status(&mut state.log, state.elapsed, applied, UnitRef::Enemy(target), on_hit);
    }
}
