//! Timer advancement and focus transitions.

use crate::config::BattleConfig;
use crate::env::BattleEnv;
use crate::state::{BattleState, CombatEvent};

/// Advances every living, unstunned unit's timers by `dt`.
///
/// All heroes accumulate attack time, but only the focused hero accumulates
/// spell time. Enemies with a summon advance their spell timer alongside the
/// attack timer.
pub fn advance_timers(state: &mut BattleState, env: &BattleEnv<'_>, dt: f64) {
    let statuses = env.statuses();
    let focus = state.focused_hero;

    for (i, hero) in state.player.iter_mut().enumerate() {
        if !hero.is_alive() || statuses.modifiers(&hero.buffs).stunned {
            continue;
        }
        hero.attack_timer += dt;
        if i == focus {
            hero.spell_timer += dt;
        }
    }

    for enemy in state.enemy.iter_mut() {
        if !enemy.is_alive() || statuses.modifiers(&enemy.buffs).stunned {
            continue;
        }
        enemy.attack_timer += dt;
        if let Some(spell_timer) = enemy.spell_timer.as_mut() {
            *spell_timer += dt;
        }
    }
}

/// Player-initiated focus switch, gated by [`BattleConfig::FOCUS_CHANGE_COOLDOWN`].
///
/// On success both the old and the new focus start from zeroed timers, so
/// time banked off-focus cannot be cashed in after switching.
pub fn apply_focus_change(state: &mut BattleState, new_index: usize) -> bool {
    let current = state.focused_hero;
    if new_index == current {
        return false;
    }
    let Some(target) = state.player.get(new_index) else {
        return false;
    };
    if !target.is_alive() {
        return false;
    }
    if state.elapsed - state.last_focus_change_at < BattleConfig::FOCUS_CHANGE_COOLDOWN {
        return false;
    }

    if let Some(previous) = state.player.get_mut(current) {
        previous.reset_timers();
    }
    state.player[new_index].reset_timers();
    state.focused_hero = new_index;
    state.last_focus_change_at = state.elapsed;
    state.log.push(
        state.elapsed,
        CombatEvent::FocusChanged {
            from: current,
            to: new_index,
            forced: false,
        },
    );
    tracing::debug!(from = current, to = new_index, elapsed = state.elapsed, "focus changed");
    true
}

/// Moves focus to the next living hero once
/// [`BattleConfig::AUTO_ROTATION_INTERVAL`] has passed since the last change.
pub fn apply_auto_rotation(state: &mut BattleState) -> bool {
    if state.elapsed - state.last_focus_change_at < BattleConfig::AUTO_ROTATION_INTERVAL {
        return false;
    }
    match state.next_living_hero(state.focused_hero) {
        Some(next) => apply_focus_change(state, next),
        None => false,
    }
}

/// Reassigns focus off a dead hero. No cooldown and no timer reset.
pub fn ensure_focus_alive(state: &mut BattleState) -> bool {
    let current = state.focused_hero;
    if state.player.get(current).is_some_and(|h| h.is_alive()) {
        return false;
    }
    let Some(next) = state.next_living_hero(current) else {
        return false;
    };
    state.focused_hero = next;
    state.log.push(
        state.elapsed,
        CombatEvent::FocusChanged {
            from: current,
            to: next,
            forced: true,
        },
    );
    tracing::debug!(from = current, to = next, "focus reassigned after death");
    true
}
