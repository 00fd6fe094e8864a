//! Battle state owned by the caller between ticks.
//!
//! The state is a plain value: the engine mutates it in place during a tick
//! and callers snapshot it (clone or serialize) when they need rollback.
//! `target_index` and `enemy_focus` always index the current enemy list; once
//! `result` is set the state is never touched again.
mod buffs;
mod log;
mod unit;

pub use buffs::{Buff, BuffApplied, Buffs};
pub use log::{CombatEvent, CombatLog, LogEntry, UnitRef};
pub use unit::{EnemyInstance, HeroInstance, Vitals};

/// Terminal outcome of a battle.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BattleResult {
    Win,
    Lose,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub player: Vec<HeroInstance>,
    pub enemy: Vec<EnemyInstance>,
    /// The only hero whose spell timer advances and who receives enemy attacks.
    pub focused_hero: usize,
    /// Enemy aimed at by basic attacks and single-target spells.
    pub target_index: usize,
    /// Enemy being tanked; hitting anything else halves basic attack damage.
    pub enemy_focus: usize,
    /// Simulated seconds since the battle started.
    pub elapsed: f64,
    pub last_focus_change_at: f64,
    pub level: u32,
    pub level_multiplier: f64,
    pub result: Option<BattleResult>,
    pub log: CombatLog,
}

impl BattleState {
    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    pub fn focused(&self) -> Option<&HeroInstance> {
        self.player.get(self.focused_hero)
    }

    pub fn living_heroes(&self) -> impl Iterator<Item = (usize, &HeroInstance)> {
        self.player.iter().enumerate().filter(|(_, h)| h.is_alive())
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = (usize, &EnemyInstance)> {
        self.enemy.iter().enumerate().filter(|(_, e)| e.is_alive())
    }

    /// Hero HP in roster order, e.g. to seed the next battle of a run.
    pub fn hero_hp(&self) -> Vec<f64> {
        self.player.iter().map(|h| h.vitals.current_hp).collect()
    }

    /// Clamps a requested enemy index into range, moving off a dead enemy when possible.
    pub fn clamp_enemy_index(&self, requested: usize) -> usize {
        let n = self.enemy.len();
        if n == 0 {
            return 0;
        }
        let idx = requested.min(n - 1);
        if self.enemy[idx].is_alive() {
            return idx;
        }
        (1..n)
            .map(|offset| (idx + offset) % n)
            .find(|&i| self.enemy[i].is_alive())
            .unwrap_or(idx)
    }

    /// Next living hero after `from` in roster order, wrapping. Never `from` itself.
    pub(crate) fn next_living_hero(&self, from: usize) -> Option<usize> {
        let n = self.player.len();
        (1..n)
            .map(|offset| (from + offset) % n)
            .find(|&i| self.player[i].is_alive())
    }

    /// Sets `result` if one side is wiped out. A cleared enemy side wins ties.
    pub(crate) fn update_result(&mut self) -> Option<BattleResult> {
        if self.result.is_some() {
            return self.result;
        }
        let enemies_dead = self.enemy.iter().all(|e| !e.is_alive());
        let heroes_dead = self.player.iter().all(|h| !h.is_alive());
        self.result = if enemies_dead {
            Some(BattleResult::Win)
        } else if heroes_dead {
            Some(BattleResult::Lose)
        } else {
            None
        };
        if let Some(result) = self.result {
            tracing::debug!(%result, elapsed = self.elapsed, "battle finished");
        }
        self.result
    }

    /// Drops dead enemies, keeps both enemy indices on the same enemy, then
    /// re-evaluates the result.
    pub(crate) fn remove_dead_enemies(&mut self) {
        if self.enemy.iter().all(EnemyInstance::is_alive) {
            self.update_result();
            return;
        }

        let shift = |index: usize, enemies: &[EnemyInstance]| {
            enemies[..index.min(enemies.len())]
                .iter()
                .filter(|e| e.is_alive())
                .count()
        };
        let target = shift(self.target_index, &self.enemy);
        let focus = shift(self.enemy_focus, &self.enemy);

        for (i, enemy) in self.enemy.iter().enumerate() {
            if !enemy.is_alive() {
                tracing::debug!(enemy = i, template = %enemy.template, "enemy died");
                self.log.push(
                    self.elapsed,
                    CombatEvent::Death {
                        unit: UnitRef::Enemy(i),
                    },
                );
            }
        }
        self.enemy.retain(EnemyInstance::is_alive);

        let last = self.enemy.len().saturating_sub(1);
        self.target_index = target.min(last);
        self.enemy_focus = focus.min(last);
        self.update_result();
    }
}
