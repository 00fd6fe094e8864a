//! Live combatants.

use super::Buffs;
use crate::env::{HeroId, SummonAbility};

/// Hit points and the shield pool in front of them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    pub current_hp: f64,
    pub max_hp: f64,
    /// Absorbs incoming hits before HP. Periodic damage bypasses it.
    pub shield_hp: f64,
}

impl Vitals {
    pub fn full(max_hp: f64) -> Self {
        Self {
            current_hp: max_hp,
            max_hp,
            shield_hp: 0.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp <= 0.0 {
            return 0.0;
        }
        self.current_hp / self.max_hp
    }

    /// Applies an attack or spell hit: shield first, overflow to HP.
    ///
    /// Returns the HP actually lost.
    pub fn take_hit(&mut self, damage: f64) -> f64 {
        if damage <= 0.0 {
            return 0.0;
        }
        let absorbed = damage.min(self.shield_hp);
        self.shield_hp -= absorbed;
        self.lose_hp(damage - absorbed)
    }

    /// Removes HP directly, ignoring the shield. Returns the HP actually lost.
    pub fn lose_hp(&mut self, damage: f64) -> f64 {
        if damage <= 0.0 {
            return 0.0;
        }
        let before = self.current_hp;
        self.current_hp = (self.current_hp - damage).max(0.0);
        before - self.current_hp
    }

    /// Restores HP up to max. Returns the HP actually restored.
    pub fn heal(&mut self, amount: f64) -> f64 {
        if amount <= 0.0 || !self.is_alive() {
            return 0.0;
        }
        let before = self.current_hp;
        self.current_hp = (self.current_hp + amount).min(self.max_hp);
        self.current_hp - before
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroInstance {
    pub hero_id: HeroId,
    pub vitals: Vitals,
    /// Seconds accumulated toward the next basic attack.
    pub attack_timer: f64,
    /// Seconds accumulated toward the next cast. Only advances while focused.
    pub spell_timer: f64,
    pub buffs: Buffs,
    /// Position in the ability list where the next cast starts looking.
    pub spell_cursor: usize,
}

impl HeroInstance {
    pub fn new(hero_id: HeroId, vitals: Vitals) -> Self {
        Self {
            hero_id,
            vitals,
            attack_timer: 0.0,
            spell_timer: 0.0,
            buffs: Buffs::empty(),
            spell_cursor: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.vitals.is_alive()
    }

    pub(crate) fn reset_timers(&mut self) {
        self.attack_timer = 0.0;
        self.spell_timer = 0.0;
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyInstance {
    pub template: String,
    /// Level-scaled max HP lives here, not in the template.
    pub vitals: Vitals,
    /// Level-scaled damage per attack.
    pub attack_damage: f64,
    pub attack_timer: f64,
    /// Present only for summoners.
    pub spell_timer: Option<f64>,
    pub buffs: Buffs,
    pub summon: Option<SummonAbility>,
}

impl EnemyInstance {
    pub fn new(template: impl Into<String>, max_hp: f64, attack_damage: f64) -> Self {
        Self {
            template: template.into(),
            vitals: Vitals::full(max_hp),
            attack_damage,
            attack_timer: 0.0,
            spell_timer: None,
            buffs: Buffs::empty(),
            summon: None,
        }
    }

    pub fn with_summon(mut self, summon: SummonAbility) -> Self {
        self.summon = Some(summon);
        self.spell_timer = Some(0.0);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.vitals.is_alive()
    }
}
