//! Tick orchestration.
//!
//! The [`BattleEngine`] is the single entry point that moves a
//! [`BattleState`] forward in time. One call is one complete transition:
//!
//! 1. elapsed time
//! 2. focus intent, target intent, auto-rotation
//! 3. timers
//! 4. status effects (early exit on a result)
//! 5. basic attacks, focused spell, enemy attacks, summons
//! 6. forced focus correction
//!
//! Nothing on this path can fail. Invalid intents are ignored.

mod resolution;
mod timers;

#[cfg(test)]
pub(crate) mod fixtures;

pub use resolution::{
    process_status_effects, resolve_basic_attack, resolve_basic_attacks, resolve_enemy_actions,
    resolve_spell, resolve_summons, select_spell,
};
pub use timers::{advance_timers, apply_auto_rotation, apply_focus_change, ensure_focus_alive};

use crate::env::{BattleEnv, RandomSource};
use crate::state::{BattleResult, BattleState};

/// Player requests carried by one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TickIntents {
    /// Roster slot to focus.
    pub focus: Option<usize>,
    /// Enemy index to aim at.
    pub target: Option<usize>,
    /// Opt in to automatic focus rotation this tick.
    pub auto_rotate: bool,
}

impl TickIntents {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn focus(index: usize) -> Self {
        Self {
            focus: Some(index),
            ..Self::default()
        }
    }

    pub fn target(index: usize) -> Self {
        Self {
            target: Some(index),
            ..Self::default()
        }
    }

    pub fn with_auto_rotate(mut self, auto_rotate: bool) -> Self {
        self.auto_rotate = auto_rotate;
        self
    }
}

/// Drives a borrowed battle state.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    /// Advances the battle by `dt` seconds and returns the result, if any.
    ///
    /// A finished battle is returned untouched. Negative or NaN `dt` counts as 0.
    pub fn tick(
        &mut self,
        env: &BattleEnv<'_>,
        rng: &mut dyn RandomSource,
        dt: f64,
        intents: &TickIntents,
    ) -> Option<BattleResult> {
        let state = &mut *self.state;
        if state.result.is_some() {
            return state.result;
        }
        let dt = if dt > 0.0 { dt } else { 0.0 };

        state.elapsed += dt;

        if let Some(focus) = intents.focus {
            apply_focus_change(state, focus);
        }
        if let Some(target) = intents.target {
            state.target_index = state.clamp_enemy_index(target);
        }
        if intents.auto_rotate {
            apply_auto_rotation(state);
        }

        advance_timers(state, env, dt);

        process_status_effects(state, env, dt);
        if state.result.is_some() {
            return state.result;
        }

        resolve_basic_attacks(state, env);
        resolve_spell(state, env);
        resolve_enemy_actions(state, env, rng);
        resolve_summons(state, env);

        ensure_focus_alive(state);

        tracing::trace!(
            elapsed = state.elapsed,
            dt,
            heroes = state.living_heroes().count(),
            enemies = state.enemy.len(),
            "tick"
        );
        state.result
    }
}

/// Value-in, value-out form of [`BattleEngine::tick`].
pub fn tick(
    state: &BattleState,
    env: &BattleEnv<'_>,
    rng: &mut dyn RandomSource,
    dt: f64,
    intents: &TickIntents,
) -> BattleState {
    let mut next = state.clone();
    BattleEngine::new(&mut next).tick(env, rng, dt, intents);
    next
}
