//! Pure numeric rules: intervals, damage composition, focus penalty, mitigation
//! and level scaling.
//!
//! Everything here is side-effect free and exact, so tests can assert on
//! hand-computed values.

mod mitigation;
mod scaling;

pub use mitigation::{
    DamageType, Defenses, apply_magical_damage, apply_physical_damage, apply_pure_damage,
    mitigate,
};
pub use scaling::{level_multiplier, scale_enemy_stat};

use crate::config::BattleConfig;

/// Seconds between two actions: `base / (1 + speed)`, floored at `min_cap` if given.
///
/// Used for attack intervals (speed = attack speed) and spell intervals
/// (speed = spell haste) alike.
pub fn effective_interval(base: f64, speed: f64, min_cap: Option<f64>) -> f64 {
    let interval = base / (1.0 + speed);
    match min_cap {
        Some(min) if interval < min => min,
        _ => interval,
    }
}

pub fn attack_damage(base: f64, flat_bonus: f64) -> f64 {
    base + flat_bonus
}

pub fn spell_damage(base: f64, spell_power: f64) -> f64 {
    base + spell_power
}

/// Full damage on the enemy focus, [`BattleConfig::OFF_FOCUS_MULTIPLIER`] elsewhere.
pub fn off_focus_penalty(damage: f64, target_is_enemy_focus: bool) -> f64 {
    if target_is_enemy_focus {
        damage
    } else {
        damage * BattleConfig::OFF_FOCUS_MULTIPLIER
    }
}
